use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ticketdeck::commands::{
    CreateOptions, OutputOptions, UpdateOptions, cmd_analyze, cmd_analyze_all, cmd_config_get,
    cmd_config_set, cmd_config_show, cmd_create, cmd_dashboard, cmd_ls, cmd_projects, cmd_show,
    cmd_update,
};
use ticketdeck::store::FilterCriteria;
use ticketdeck::types::{IssueType, VALID_ISSUE_TYPES};

#[derive(Parser)]
#[command(name = "ticketdeck")]
#[command(about = "Issue tracker dashboard with AI analysis")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    #[command(visible_alias = "d")]
    Dashboard,

    /// List tickets
    Ls {
        /// Keep tickets whose status contains this text
        #[arg(long)]
        status: Option<String>,

        /// Keep tickets whose priority contains this text
        #[arg(long)]
        priority: Option<String>,

        /// Keep tickets whose assignee contains this text
        #[arg(long)]
        assignee: Option<String>,

        /// Fetch every page instead of only the first
        #[arg(short, long)]
        all: bool,
    },

    /// Display a ticket
    #[command(visible_alias = "s")]
    Show {
        /// Issue key, e.g. PROJ-12
        key: String,
    },

    /// Create a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Project key
        #[arg(short, long)]
        project: String,

        /// Ticket summary
        summary: String,

        /// Description text
        #[arg(short, long)]
        description: String,

        /// Type: Task, Bug, Story, Epic (default: Task)
        #[arg(short = 't', long = "type", default_value = "Task", value_parser = parse_issue_type)]
        issue_type: IssueType,
    },

    /// Update a ticket
    Update {
        /// Issue key
        key: String,

        #[arg(long)]
        summary: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Analyze a ticket, or every ticket with --all
    Analyze {
        /// Issue key
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        key: Option<String>,

        /// Analyze every ticket
        #[arg(long)]
        all: bool,
    },

    /// List projects
    Projects,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key: api_url or page_size
        key: String,
        value: String,
    },
    /// Get a configuration value
    Get {
        key: String,
    },
}

fn parse_issue_type(s: &str) -> Result<IssueType, String> {
    s.parse().map_err(|_| {
        format!(
            "invalid issue type '{}'. Must be one of: {}",
            s,
            VALID_ISSUE_TYPES.join(", ")
        )
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let output = OutputOptions { json: cli.json };

    let result = match cli.command {
        Commands::Dashboard => cmd_dashboard().await,
        Commands::Ls {
            status,
            priority,
            assignee,
            all,
        } => {
            let filter = FilterCriteria {
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                assignee: assignee.unwrap_or_default(),
            };
            cmd_ls(filter, all, output).await
        }
        Commands::Show { key } => cmd_show(&key, output).await,
        Commands::Create {
            project,
            summary,
            description,
            issue_type,
        } => {
            cmd_create(
                CreateOptions {
                    project_key: project,
                    summary,
                    description,
                    issue_type,
                },
                output,
            )
            .await
        }
        Commands::Update {
            key,
            summary,
            description,
            status,
        } => {
            cmd_update(
                &key,
                UpdateOptions {
                    summary,
                    description,
                    status,
                },
                output,
            )
            .await
        }
        Commands::Analyze { key, all } => match key {
            Some(key) if !all => cmd_analyze(&key, output).await,
            _ => cmd_analyze_all(output).await,
        },
        Commands::Projects => cmd_projects(output).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(output),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value, output),
            ConfigAction::Get { key } => cmd_config_get(&key, output),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
