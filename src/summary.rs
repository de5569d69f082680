use crate::config::Budget;
use crate::currency::{self, Conversion};
use crate::currency_provider::CurrencyProvider;
use crate::transactions::{Transaction, TransactionKind, classify};
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;
use tracing::debug;

/// Budget usage at or past this share of the limit is flagged.
const NEAR_LIMIT_PCT: f64 = 90.0;

/// Totals for the dashboard cards.
///
/// Income and expenses are sums of display magnitudes, grouped by each
/// record's kind; a mislabelled amount sign does not move a record between
/// buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub transaction_count: usize,
}

pub fn summarize(transactions: &[Transaction]) -> DashboardSummary {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for transaction in transactions {
        let display = classify(transaction);
        match transaction.kind {
            TransactionKind::Income => income += display.magnitude,
            TransactionKind::Expense => expenses += display.magnitude,
        }
    }

    DashboardSummary {
        income,
        expenses,
        savings: income - expenses,
        transaction_count: transactions.len(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub share_pct: f64,
}

/// Expense totals per category with their share of all expenses, sorted by
/// amount descending. Income records are excluded.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        let magnitude = classify(transaction).magnitude;
        match totals.iter_mut().find(|(c, _)| *c == transaction.category) {
            Some((_, amount)) => *amount += magnitude,
            None => totals.push((transaction.category.clone(), magnitude)),
        }
    }

    let total: f64 = totals.iter().map(|(_, amount)| *amount).sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            share_pct: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shares
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUsage {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub used_pct: f64,
    pub near_limit: bool,
}

/// Spending against each budget, with spent amounts derived from the
/// expense records in the budget's category.
pub fn budget_usage(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .map(|budget| {
            let spent: f64 = transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense && t.category == budget.category)
                .map(|t| classify(t).magnitude)
                .sum();
            let used_pct = if budget.limit > 0.0 {
                (spent / budget.limit) * 100.0
            } else {
                0.0
            };

            BudgetUsage {
                category: budget.category.clone(),
                spent,
                limit: budget.limit,
                used_pct,
                near_limit: used_pct >= NEAR_LIMIT_PCT,
            }
        })
        .collect()
}

/// Computes the dashboard, converts the card totals into the display
/// currency, and prints the result.
///
/// Conversions run concurrently; when the conversion service is down the
/// totals fall back to the base currency and a notice is printed.
pub async fn generate_and_display_summary(
    transactions: &[Transaction],
    budgets: &[Budget],
    provider: &dyn CurrencyProvider,
    base_currency: &str,
    display_currency: &str,
) -> Result<()> {
    let summary = summarize(transactions);
    debug!(
        "Summary totals: income={} expenses={} savings={}",
        summary.income, summary.expenses, summary.savings
    );

    let cards = [
        ("Income", summary.income),
        ("Expenses", summary.expenses),
        ("Savings", summary.savings),
    ];

    let pb = ui::new_progress_bar(cards.len() as u64, true);
    pb.set_message("Converting totals...");

    let conversions: Vec<(&str, Conversion)> = join_all(cards.iter().map(|(label, value)| {
        let pb = pb.clone();
        async move {
            let converted = currency::convert(provider, *value, base_currency, display_currency).await;
            pb.inc(1);
            (*label, converted)
        }
    }))
    .await;
    pb.finish_and_clear();

    let any_fallback = conversions.iter().any(|(_, c)| c.is_fallback());
    let card_currency = if any_fallback {
        base_currency
    } else {
        display_currency
    };

    let mut cards_table = ui::new_styled_table();
    cards_table.set_header(vec![
        ui::header_cell("Card"),
        ui::header_cell(&format!("Value ({card_currency})")),
    ]);
    for (label, conversion) in &conversions {
        cards_table.add_row(vec![
            Cell::new(*label),
            ui::value_cell(&currency::format_amount(
                Some(conversion.amount()),
                card_currency,
            )),
        ]);
    }

    println!("{}", ui::style_text("Dashboard", ui::StyleType::Title));
    println!("\n{cards_table}");
    if any_fallback {
        println!(
            "{}",
            ui::style_text(
                &format!("Conversion service unavailable; values shown in {base_currency}."),
                ui::StyleType::Subtle
            )
        );
    }

    let shares = expenses_by_category(transactions);
    if !shares.is_empty() {
        let mut shares_table = ui::new_styled_table();
        shares_table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Spent ({base_currency})")),
            ui::header_cell("Share (%)"),
        ]);
        for share in &shares {
            shares_table.add_row(vec![
                Cell::new(&share.category),
                ui::value_cell(&currency::format_amount(Some(share.amount), base_currency)),
                ui::value_cell(&format!("{:.1}%", share.share_pct)),
            ]);
        }

        ui::print_separator();
        println!(
            "{}",
            ui::style_text("Expenses by Category", ui::StyleType::Title)
        );
        println!("\n{shares_table}");
    }

    let usage = budget_usage(budgets, transactions);
    if !usage.is_empty() {
        let mut budgets_table = ui::new_styled_table();
        budgets_table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Spent ({base_currency})")),
            ui::header_cell(&format!("Limit ({base_currency})")),
            ui::header_cell("Used (%)"),
        ]);
        for entry in &usage {
            budgets_table.add_row(vec![
                Cell::new(&entry.category),
                ui::value_cell(&currency::format_amount(Some(entry.spent), base_currency)),
                ui::value_cell(&currency::format_amount(Some(entry.limit), base_currency)),
                ui::usage_cell(entry.used_pct),
            ]);
        }

        ui::print_separator();
        println!(
            "{}",
            ui::style_text("Budget vs Spending", ui::StyleType::Title)
        );
        println!("\n{budgets_table}");

        for entry in usage.iter().filter(|u| u.near_limit) {
            println!(
                "{}",
                ui::style_text(
                    &format!("Approaching limit: {}", entry.category),
                    ui::StyleType::Error
                )
            );
        }
    }

    println!(
        "\n{} {}  {} {}",
        ui::style_text("Net Income:", ui::StyleType::TotalLabel),
        ui::style_text(
            &currency::format_amount(Some(summary.savings), base_currency),
            ui::StyleType::TotalValue
        ),
        ui::style_text("Transactions:", ui::StyleType::TotalLabel),
        summary.transaction_count
    );

    Ok(())
}
