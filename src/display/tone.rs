//! Colour classification of status, priority and confidence labels.

use owo_colors::OwoColorize;

/// Semantic colour of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Neutral,
    Warning,
    Danger,
}

impl Tone {
    /// Paint `text` for the terminal
    pub fn paint(self, text: &str) -> String {
        match self {
            Tone::Success => text.green().to_string(),
            Tone::Info => text.blue().to_string(),
            Tone::Neutral => text.dimmed().to_string(),
            Tone::Warning => text.yellow().to_string(),
            Tone::Danger => text.red().to_string(),
        }
    }
}

pub fn status_tone(status: &str) -> Tone {
    let lower = status.to_lowercase();
    if lower.contains("done") || lower.contains("closed") {
        Tone::Success
    } else if lower.contains("progress") {
        Tone::Info
    } else if lower.contains("todo") || lower.contains("open") {
        Tone::Neutral
    } else {
        Tone::Warning
    }
}

pub fn priority_tone(priority: Option<&str>) -> Tone {
    let Some(priority) = priority else {
        return Tone::Neutral;
    };
    let lower = priority.to_lowercase();
    if lower.contains("high") || lower.contains("critical") {
        Tone::Danger
    } else if lower.contains("medium") {
        Tone::Warning
    } else {
        Tone::Info
    }
}

/// Confidence band of an analysis score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Confidence::High
        } else if score >= 0.6 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "High confidence",
            Confidence::Medium => "Medium confidence",
            Confidence::Low => "Low confidence",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Confidence::High => Tone::Success,
            Confidence::Medium => Tone::Warning,
            Confidence::Low => Tone::Danger,
        }
    }
}

/// Score as a whole percentage, e.g. 0.826 -> 83
pub fn confidence_percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
