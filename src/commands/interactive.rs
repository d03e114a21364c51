//! Line-based prompts on stdin/stdout.

use std::io::{self, Write};

use crate::error::Result;

/// Read one line from stdin. Returns `None` at end of input.
pub fn read_line() -> Result<Option<String>> {
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompt user for yes/no confirmation
///
/// # Example
/// ```no_run
/// # use ticketdeck::commands::interactive::confirm;
/// let confirmed = confirm("Try again").unwrap();
/// ```
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{}? [y/N] ", prompt);
    io::stdout().flush()?;

    Ok(read_line()?.is_some_and(|input| input.trim().eq_ignore_ascii_case("y")))
}

/// Prompt user to select from a list of options, returning its index.
/// End of input selects the default, or the first option.
pub fn select_option(prompt: &str, options: &[&str], default: Option<usize>) -> Result<usize> {
    let listing: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{i}) {o}"))
        .collect();
    println!("{}", listing.join("  "));

    loop {
        if let Some(idx) = default {
            print!("{} [0-{}] (default {}): ", prompt, options.len() - 1, idx);
        } else {
            print!("{} [0-{}]: ", prompt, options.len() - 1);
        }
        io::stdout().flush()?;

        let Some(input) = read_line()? else {
            return Ok(default.unwrap_or(0));
        };
        let input = input.trim();

        if input.is_empty() {
            if let Some(idx) = default {
                return Ok(idx);
            }
            println!("Please enter a number.");
            continue;
        }

        if let Ok(idx) = input.parse::<usize>()
            && idx < options.len()
        {
            return Ok(idx);
        }

        println!(
            "Invalid input. Please enter a number between 0 and {}.",
            options.len() - 1
        );
    }
}

/// Prompt user for text input, falling back to `default` on an empty answer
///
/// # Example
/// ```no_run
/// # use ticketdeck::commands::interactive::prompt_text;
/// let summary = prompt_text("Summary", Some("Login fails")).unwrap();
/// ```
pub fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) if !d.is_empty() => print!("{} [{}]: ", prompt, d),
        _ => print!("{}: ", prompt),
    }
    io::stdout().flush()?;

    let input = read_line()?.unwrap_or_default();
    let input = input.trim();

    if input.is_empty()
        && let Some(d) = default
    {
        return Ok(d.to_string());
    }

    Ok(input.to_string())
}
