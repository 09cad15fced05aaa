use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Table};

/// Printed by listing commands when there is nothing to list
pub const EMPTY_LISTING: &str = "EMPTY";

/// Table with the console's border preset and a header row
pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(headers.iter().map(Cell::new).collect::<Vec<_>>());
    table
}

/// Comma-separated names, or `ALL` for a handle without a rule list
pub fn format_rule_list(names: &[String]) -> String {
    if names.is_empty() {
        "ALL".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_renders_header_and_rows() {
        let mut table = create_styled_table(&["Name", "Filter"]);
        table.add_row(vec![Cell::new("pets"), Cell::new("cat OR dog")]);
        let rendered = table.to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("cat OR dog"));
    }

    #[test]
    fn test_rule_list_formatting() {
        assert_eq!(format_rule_list(&[]), "ALL");
        assert_eq!(format_rule_list(&["a".into(), "b".into()]), "a, b");
    }
}
