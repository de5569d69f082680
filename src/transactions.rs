//! Transaction records, filtering, and display classification.

use crate::currency;
use crate::ui;
use chrono::NaiveDate;
use comfy_table::Cell;
use serde::{Deserialize, Serialize};

/// Whether a record represents money coming in or going out.
///
/// Deserialization is permissive: any spelling of "income" maps to `Income`,
/// everything else to `Expense`. Records whose `amount` sign disagrees with
/// their kind keep the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("income") {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub category: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Sign and magnitude used when rendering a transaction amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayAmount {
    pub sign: char,
    pub magnitude: f64,
}

/// Derives the display sign and magnitude for a transaction.
///
/// The sign follows the record's kind, not the sign of `amount`: an income
/// record with a negative amount still displays as `+`.
pub fn classify(transaction: &Transaction) -> DisplayAmount {
    let sign = match transaction.kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    DisplayAmount {
        sign,
        magnitude: transaction.amount.abs(),
    }
}

/// Returns the transactions whose name contains `search_term`
/// (case-insensitive) and whose category matches `category`.
///
/// An empty search term matches every name; the category `"All"` matches
/// every category, otherwise the comparison is exact and case-sensitive.
/// Input order is preserved and the input is never mutated.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    search_term: &str,
    category: &str,
) -> Vec<&'a Transaction> {
    let needle = search_term.to_lowercase();
    transactions
        .iter()
        .filter(|transaction| {
            let matches_search = transaction.name.to_lowercase().contains(&needle);
            let matches_category = category == "All" || transaction.category == category;
            matches_search && matches_category
        })
        .collect()
}

/// Renders a transaction list as a styled table.
pub fn render_table(transactions: &[&Transaction], display_currency: &str) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Category"),
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
    ]);

    for transaction in transactions {
        let display = classify(transaction);
        let amount = format!(
            "{}{}",
            display.sign,
            currency::format_amount(Some(display.magnitude), display_currency)
        );

        table.add_row(vec![
            Cell::new(&transaction.name),
            Cell::new(&transaction.category),
            Cell::new(transaction.date.format("%b %d").to_string()),
            ui::amount_cell(&amount, transaction.kind == TransactionKind::Income),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(name: &str, category: &str, amount: f64, kind: &str) -> Transaction {
        Transaction {
            id: 0,
            name: name.to_string(),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(),
            amount,
            kind: TransactionKind::from(kind.to_string()),
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            transaction("Salary", "Income", 5000.0, "income"),
            transaction("Grocery Shopping", "Food", -150.0, "expense"),
            transaction("Netflix Subscription", "Entertainment", -15.0, "expense"),
            transaction("Restaurant Dinner", "Dining", -80.0, "expense"),
            transaction("Freelance Project", "Income", 1200.0, "income"),
        ]
    }

    #[test]
    fn test_kind_parses_income_case_insensitively() {
        assert_eq!(
            TransactionKind::from("INCOME".to_string()),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::from("Income".to_string()),
            TransactionKind::Income
        );
    }

    #[test]
    fn test_kind_defaults_to_expense() {
        assert_eq!(
            TransactionKind::from("expense".to_string()),
            TransactionKind::Expense
        );
        assert_eq!(
            TransactionKind::from("transfer".to_string()),
            TransactionKind::Expense
        );
        assert_eq!(TransactionKind::from(String::new()), TransactionKind::Expense);
    }

    #[test]
    fn test_filter_no_criteria_returns_everything_in_order() {
        let transactions = sample_transactions();

        let visible = filter(&transactions, "", "All");

        assert_eq!(visible.len(), transactions.len());
        let names: Vec<&str> = visible.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Salary",
                "Grocery Shopping",
                "Netflix Subscription",
                "Restaurant Dinner",
                "Freelance Project",
            ]
        );
    }

    #[test]
    fn test_filter_search_is_case_insensitive_substring() {
        let transactions = sample_transactions();

        let visible = filter(&transactions, "net", "All");

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Netflix Subscription");
    }

    #[test]
    fn test_filter_by_category_is_exact() {
        let transactions = sample_transactions();

        let visible = filter(&transactions, "", "Food");

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Grocery Shopping");
    }

    #[test]
    fn test_filter_category_is_case_sensitive() {
        let transactions = sample_transactions();

        assert!(filter(&transactions, "", "food").is_empty());
    }

    #[test]
    fn test_filter_combines_search_and_category() {
        let transactions = sample_transactions();

        let visible = filter(&transactions, "r", "Income");

        let names: Vec<&str> = visible.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Freelance Project"]);
    }

    #[test]
    fn test_filter_end_to_end_scenario() {
        let transactions = vec![
            transaction("Salary", "Income", 5000.0, "INCOME"),
            transaction("Groceries", "Food", -150.0, "EXPENSE"),
        ];

        let visible = filter(&transactions, "gro", "All");

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Groceries");
    }

    #[test]
    fn test_classify_income_is_positive() {
        let t = transaction("Salary", "Income", 5000.0, "income");

        let display = classify(&t);

        assert_eq!(display.sign, '+');
        assert_eq!(display.magnitude, 5000.0);
    }

    #[test]
    fn test_classify_expense_magnitude_is_absolute() {
        let t = transaction("Groceries", "Food", -150.0, "expense");

        let display = classify(&t);

        assert_eq!(display.sign, '-');
        assert_eq!(display.magnitude, 150.0);
    }

    #[test]
    fn test_classify_kind_wins_over_amount_sign() {
        // Malformed record: labelled income but stored with a negative amount.
        let t = transaction("Refund", "Income", -50.0, "INCOME");

        let display = classify(&t);

        assert_eq!(display.sign, '+');
        assert_eq!(display.magnitude, 50.0);
    }

    #[test]
    fn test_transaction_deserializes_from_wire_shape() {
        let json = r#"{
            "id": 3,
            "name": "Netflix Subscription",
            "category": "Entertainment",
            "date": "2024-10-08",
            "amount": -15.0,
            "type": "expense"
        }"#;

        let t: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(t.id, 3);
        assert_eq!(t.kind, TransactionKind::Expense);
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 10, 8).unwrap());
    }

    #[test]
    fn test_render_table_includes_signed_amounts() {
        let transactions = sample_transactions();
        let visible = filter(&transactions, "", "All");

        let rendered = render_table(&visible, "USD");

        assert!(rendered.contains("+$5,000.00"));
        assert!(rendered.contains("-$150.00"));
        assert!(rendered.contains("Oct 10"));
    }
}
