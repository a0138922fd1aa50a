use crate::core::store::PriceStore;
use crate::domain::model::ExportSummary;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::format::{format_quantity, format_ratio};
use html_escape::encode_text;
use std::fmt::Write;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Product positions";

const COLUMNS: [&str; 6] = ["#", "Name", "Price", "Weight", "File", "Price per kg"];

/// Renders the store as a standalone HTML document, one row per entry in
/// store order. The output depends only on the store and the title.
pub fn render_html(store: &PriceStore, title: &str) -> String {
    let title = encode_text(title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "    <title>{}</title>", title);
    html.push_str("</head>\n<body>\n    <table border=\"1\">\n        <tr>\n");
    for column in COLUMNS {
        let _ = writeln!(html, "            <th>{}</th>", column);
    }
    html.push_str("        </tr>\n");

    for (i, entry) in store.iter().enumerate() {
        html.push_str("        <tr>\n");
        let cells = [
            (i + 1).to_string(),
            encode_text(entry.name()).into_owned(),
            format_quantity(entry.price()),
            format_quantity(entry.weight()),
            encode_text(entry.source_file()).into_owned(),
            format_ratio(entry.price_per_unit_weight()),
        ];
        for cell in &cells {
            let _ = writeln!(html, "            <td>{}</td>", cell);
        }
        html.push_str("        </tr>\n");
    }

    html.push_str("    </table>\n</body>\n</html>\n");
    html
}

/// Writes the HTML report to `path`, replacing any existing file.
pub fn export_html<S: Storage>(
    storage: &S,
    store: &PriceStore,
    path: &Path,
    title: &str,
) -> Result<ExportSummary> {
    let html = render_html(store, title);
    tracing::debug!(
        "Writing HTML report ({} bytes, {} rows) to {}",
        html.len(),
        store.len(),
        path.display()
    );
    storage.write_file(path, html.as_bytes())?;

    tracing::info!("Exported {} entries to {}", store.len(), path.display());
    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: store.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PriceEntry;
    use crate::utils::error::PriceError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(Path::new(path))
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn list_files(&self, _dir: &Path) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                PriceError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn store() -> PriceStore {
        let mut store = PriceStore::new();
        store.append(PriceEntry::new("Milk", 60.0, 2.0, "price_1.csv").unwrap());
        store.append(PriceEntry::new("Tom & Jerry <cheese>", 100.0, 0.3, "price_2.csv").unwrap());
        store
    }

    #[test]
    fn test_render_html_rows() {
        let html = render_html(&store(), DEFAULT_TITLE);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<td>Milk</td>"));
        assert!(html.contains("<td>60.0</td>"));
        assert!(html.contains("<td>2.0</td>"));
        assert!(html.contains("<td>30.0</td>"));
        assert!(html.contains("<td>333.3</td>"));
    }

    #[test]
    fn test_render_html_escapes_text() {
        let html = render_html(&store(), "Prices <today>");
        assert!(html.contains("Tom &amp; Jerry &lt;cheese&gt;"));
        assert!(html.contains("<title>Prices &lt;today&gt;</title>"));
    }

    #[test]
    fn test_empty_store_has_header_only() {
        let html = render_html(&PriceStore::new(), DEFAULT_TITLE);
        assert_eq!(html.matches("<tr>").count(), 1);
        assert_eq!(html.matches("<th>").count(), 6);
    }

    #[test]
    fn test_export_is_idempotent() {
        let storage = MockStorage::default();
        let store = store();

        let summary = export_html(&storage, &store, Path::new("out.html"), DEFAULT_TITLE).unwrap();
        let first = storage.get_file("out.html").unwrap();
        export_html(&storage, &store, Path::new("out.html"), DEFAULT_TITLE).unwrap();
        let second = storage.get_file("out.html").unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(first, second);
    }
}
