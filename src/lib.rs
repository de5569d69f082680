pub mod config;
pub mod currency;
pub mod currency_provider;
pub mod log;
pub mod providers;
pub mod summary;
pub mod transaction_provider;
pub mod transactions;
pub mod ui;

use crate::transaction_provider::TransactionProvider;
use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Summary,
    Transactions { search: String, category: String },
    Rates,
    Delete { id: i64 },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Finance tracker starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .backend
        .as_ref()
        .map_or(config::DEFAULT_BACKEND_URL, |b| b.base_url.as_str());
    let backend = providers::backend::BackendProvider::new(base_url);

    if let AppCommand::Delete { id } = command {
        backend
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete transaction {id}"))?;
        println!("Deleted transaction {id}");
        return Ok(());
    }

    let transactions = match config.user {
        Some(user_id) => backend
            .fetch_for_user(user_id)
            .await
            .with_context(|| format!("Failed to fetch transactions for user {user_id}"))?,
        None => config.transactions.clone(),
    };
    debug!("Loaded {} transactions", transactions.len());

    match command {
        AppCommand::Summary => {
            summary::generate_and_display_summary(
                &transactions,
                &config.budgets,
                &backend,
                &config.base_currency,
                &config.currency,
            )
            .await
        }
        AppCommand::Transactions { search, category } => {
            let visible = transactions::filter(&transactions, &search, &category);

            println!("{}", ui::style_text("Transactions", ui::StyleType::Title));
            println!("\n{}", transactions::render_table(&visible, &config.currency));
            println!(
                "{}",
                ui::style_text(
                    &format!("{} of {} shown", visible.len(), transactions.len()),
                    ui::StyleType::Subtle
                )
            );
            Ok(())
        }
        AppCommand::Rates => {
            let rates = currency::fetch_rates(&backend).await;

            if rates.is_empty() {
                println!(
                    "{}",
                    ui::style_text("Exchange rates unavailable.", ui::StyleType::Error)
                );
                return Ok(());
            }

            let mut sorted: Vec<(&String, &f64)> = rates.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));

            let mut table = ui::new_styled_table();
            table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);
            for (code, rate) in sorted {
                table.add_row(vec![
                    comfy_table::Cell::new(code),
                    ui::value_cell(&format!("{rate:.4}")),
                ]);
            }

            println!("{}", ui::style_text("Exchange Rates", ui::StyleType::Title));
            println!("\n{table}");
            Ok(())
        }
        AppCommand::Delete { .. } => unreachable!("Delete is handled before transactions load"),
    }
}
