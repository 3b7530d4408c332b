//! Category catalogue display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::TransactionCategory;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Icon")]
    icon: &'static str,
}

/// Format categories as a table
pub fn format_category_table(categories: &[&TransactionCategory]) -> String {
    let rows: Vec<_> = categories
        .iter()
        .map(|c| CategoryRow {
            key: c.id,
            name: c.name,
            kind: c.kind.to_string(),
            icon: c.icon,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{categories_by_type, TransactionType};

    #[test]
    fn test_category_table() {
        let income = categories_by_type(TransactionType::Income);
        let table = format_category_table(&income);

        assert!(table.contains("salary"));
        assert!(table.contains("Freelance"));
        assert!(!table.contains("groceries"));
    }
}
