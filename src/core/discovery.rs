use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Returns the price-list files in `dir`: names containing `marker`
/// (case-insensitive) with the given extension (case-insensitive, no dot).
///
/// Names come back sorted so ingestion order, and therefore tie order in
/// search results, is reproducible across platforms.
pub fn discover_price_files<S: Storage>(
    storage: &S,
    dir: &Path,
    marker: &str,
    extension: &str,
) -> Result<Vec<String>> {
    let marker = marker.to_lowercase();
    let mut files: Vec<String> = storage
        .list_files(dir)?
        .into_iter()
        .filter(|name| is_price_file(name, &marker, extension))
        .collect();
    files.sort();

    tracing::debug!(
        "Discovered {} price files in {}",
        files.len(),
        dir.display()
    );
    Ok(files)
}

fn is_price_file(name: &str, marker_lower: &str, extension: &str) -> bool {
    let has_extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

    has_extension && name.to_lowercase().contains(marker_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_price_file() {
        assert!(is_price_file("price_1.csv", "price", "csv"));
        assert!(is_price_file("Shop_PRICE.CSV", "price", "csv"));
        assert!(!is_price_file("price_1.txt", "price", "csv"));
        assert!(!is_price_file("stock.csv", "price", "csv"));
        assert!(!is_price_file("price", "price", "csv"));
    }
}
