use crate::core::store::PriceStore;
use crate::domain::model::PriceEntry;
use crate::utils::format::{format_quantity, format_ratio};
use std::fmt::Write;

/// Entries whose name contains `fragment` (case-insensitive), cheapest per
/// kilogram first. Equal ratios keep store order. An empty fragment matches
/// everything.
pub fn search<'a>(store: &'a PriceStore, fragment: &str) -> Vec<&'a PriceEntry> {
    let needle = fragment.to_lowercase();
    let mut matches: Vec<&PriceEntry> = store
        .iter()
        .filter(|entry| entry.name().to_lowercase().contains(&needle))
        .collect();

    // sort_by is stable, ties stay in ingestion order
    matches.sort_by(|a, b| {
        a.price_per_unit_weight()
            .total_cmp(&b.price_per_unit_weight())
    });
    matches
}

pub const NO_MATCHES: &str = "No matches found.";

/// Console table for search results.
pub fn render_results(results: &[&PriceEntry]) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_MATCHES);
    }

    let mut out = format!(
        "{:<4} {:<30} {:<8} {:<8} {:<15} {:<10}\n",
        "#", "Name", "Price", "Weight", "File", "Price/kg"
    );
    for (i, entry) in results.iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "{:<4} {:<30} {:<8} {:<8} {:<15} {:<10}",
            i + 1,
            entry.name(),
            format_quantity(entry.price()),
            format_quantity(entry.weight()),
            entry.source_file(),
            format_ratio(entry.price_per_unit_weight())
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, price: f64, weight: f64, file: &str) -> PriceEntry {
        PriceEntry::new(name, price, weight, file).unwrap()
    }

    fn store() -> PriceStore {
        let mut store = PriceStore::new();
        store.append(entry("Milk 3.2%", 90.0, 1.0, "price_a.csv"));
        store.append(entry("Bread", 40.0, 0.5, "price_a.csv"));
        store.append(entry("Goat milk", 60.0, 2.0, "price_b.csv"));
        store.append(entry("MILK powder", 30.0, 1.0, "price_b.csv"));
        store
    }

    #[test]
    fn test_case_insensitive_substring() {
        let store = store();
        let names: Vec<&str> = search(&store, "milk").iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Goat milk", "MILK powder", "Milk 3.2%"]);
    }

    #[test]
    fn test_equal_ratios_keep_insertion_order() {
        let store = store();
        let results = search(&store, "MILK");
        assert_eq!(results[0].source_file(), "price_b.csv");
        assert_eq!(results[0].name(), "Goat milk");
        assert_eq!(results[1].name(), "MILK powder");
    }

    #[test]
    fn test_empty_fragment_returns_all_sorted() {
        let store = store();
        let results = search(&store, "");
        assert_eq!(results.len(), 4);
        assert!(results
            .windows(2)
            .all(|w| w[0].price_per_unit_weight() <= w[1].price_per_unit_weight()));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let store = store();
        let results = search(&store, "caviar");
        assert!(results.is_empty());
        assert_eq!(render_results(&results), "No matches found.\n");
    }

    #[test]
    fn test_render_results_rows() {
        let store = store();
        let table = render_results(&search(&store, "bread"));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1    Bread"));
        assert!(lines[1].contains("40.0"));
        assert!(lines[1].contains("80.0"));
    }
}
