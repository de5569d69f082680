use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fintrack::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fintrack::AppCommand {
    fn from(cmd: Commands) -> fintrack::AppCommand {
        match cmd {
            Commands::Summary => fintrack::AppCommand::Summary,
            Commands::Transactions { search, category } => {
                fintrack::AppCommand::Transactions { search, category }
            }
            Commands::Rates => fintrack::AppCommand::Rates,
            Commands::Delete { id } => fintrack::AppCommand::Delete { id },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display dashboard summary
    Summary,
    /// List transactions
    Transactions {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact category filter; "All" disables it
        #[arg(long, default_value = "All")]
        category: String,
    },
    /// Display exchange rates
    Rates,
    /// Delete a transaction on the backend
    Delete {
        /// Transaction id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fintrack::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fintrack::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
transactions:
  - name: "Salary"
    category: "Income"
    date: 2024-10-10
    amount: 5000.0
    type: "income"
  - name: "Grocery Shopping"
    category: "Food"
    date: 2024-10-09
    amount: -150.0
    type: "expense"

budgets:
  - category: "Food"
    limit: 500.0

providers:
  backend:
    base_url: "http://localhost:8080"

currency: "USD"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
