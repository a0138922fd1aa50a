use crate::core::column_mapper::ColumnMapper;
use crate::core::discovery::discover_price_files;
use crate::core::normalizer::normalize_row;
use crate::core::sniffer::DialectSniffer;
use crate::core::store::PriceStore;
use crate::domain::model::{FileReport, FileStatus, IngestReport, RowOutcome, SkipReason};
use crate::domain::ports::Storage;
use crate::utils::error::{PriceError, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// Sequential ingestion of price-list files into a [`PriceStore`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    sniffer: DialectSniffer,
    mapper: ColumnMapper,
}

impl Ingestor {
    pub fn new(sniffer: DialectSniffer, mapper: ColumnMapper) -> Self {
        Self { sniffer, mapper }
    }

    /// Discovers and loads every price file in `dir`, one after another.
    ///
    /// Directory and read failures abort the run; files with an undetectable
    /// dialect are reported and skipped.
    pub fn ingest_dir<S: Storage>(
        &self,
        storage: &S,
        dir: &Path,
        marker: &str,
        extension: &str,
        store: &mut PriceStore,
    ) -> Result<IngestReport> {
        let files = discover_price_files(storage, dir, marker, extension)?;
        if files.is_empty() {
            tracing::warn!(
                "No '*{}*.{}' files found in {}",
                marker,
                extension,
                dir.display()
            );
        }

        let mut report = IngestReport::default();
        for file in files {
            let data = storage.read_file(&dir.join(&file))?;
            report.files.push(self.ingest_bytes(&file, &data, store));
        }

        tracing::info!(
            "Loaded {} entries from {} files ({} rows skipped, {} files rejected)",
            report.accepted_total(),
            report.files.len(),
            report.skipped_total(),
            report.rejected_files().count()
        );
        Ok(report)
    }

    /// Loads one file's contents. Never fails: problems end up in the report.
    pub fn ingest_bytes(&self, file: &str, data: &[u8], store: &mut PriceStore) -> FileReport {
        let delimiter = match self.sniffer.sniff_bytes(file, data) {
            Ok(delimiter) => delimiter,
            Err(PriceError::DialectDetectionError { reason, .. }) => {
                tracing::warn!("Skipping {}: {}", file, reason);
                return FileReport::new(file, FileStatus::DialectRejected { reason });
            }
            Err(other) => {
                let reason = other.to_string();
                tracing::warn!("Skipping {}: {}", file, reason);
                return FileReport::new(file, FileStatus::DialectRejected { reason });
            }
        };

        let mut report = FileReport::new(file, FileStatus::Ingested { delimiter });
        let content = String::from_utf8_lossy(data);
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter as u8)
            .from_reader(content.as_bytes());
        let mut records = reader.records();

        match records.next() {
            Some(Ok(headers)) => report.mapping = self.mapper.map_headers(headers.iter()),
            Some(Err(e)) => tracing::warn!("Unreadable header row in {}: {}", file, e),
            None => {}
        }

        let missing = report.mapping.missing_fields();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            tracing::warn!(
                "{} has no recognised {} column; it contributes no entries",
                file,
                names.join("/")
            );
        }

        for (row, record) in records.enumerate() {
            let outcome = match record {
                Ok(record) => normalize_row(&record, &report.mapping, file),
                Err(_) => RowOutcome::Skipped(SkipReason::MalformedRecord),
            };
            match outcome {
                RowOutcome::Entry(entry) => {
                    store.append(entry);
                    report.accepted += 1;
                }
                RowOutcome::Skipped(reason) => {
                    tracing::debug!("{} data row {}: skipped, {}", file, row + 1, reason);
                    report.record_skip(&reason);
                }
            }
        }

        tracing::info!(
            "{}: delimiter {:?}, {} accepted, {} skipped",
            file,
            delimiter,
            report.accepted,
            report.skipped_total()
        );
        report
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(DialectSniffer::default(), ColumnMapper::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ColumnMapping;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MockStorage {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl MockStorage {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(name, body)| {
                        (Path::new("prices").join(name), body.as_bytes().to_vec())
                    })
                    .collect(),
            }
        }
    }

    impl Storage for MockStorage {
        fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
            Ok(self
                .files
                .keys()
                .filter(|path| path.parent() == Some(dir))
                .filter_map(|path| path.file_name()?.to_str().map(String::from))
                .collect())
        }

        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                PriceError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, _path: &Path, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn ingest(files: &[(&str, &str)]) -> (PriceStore, IngestReport) {
        let storage = MockStorage::new(files);
        let mut store = PriceStore::new();
        let report = Ingestor::default()
            .ingest_dir(&storage, Path::new("prices"), "price", "csv", &mut store)
            .unwrap();
        (store, report)
    }

    #[test]
    fn test_zero_weight_row_is_dropped() {
        let (store, report) =
            ingest(&[("price_1.csv", "name,price,weight\nMilk,60,2\nBread,40,0\n")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].name(), "Milk");
        assert!((store.entries()[0].price_per_unit_weight() - 30.0).abs() < 1e-9);

        let file = report.file("price_1.csv").unwrap();
        assert_eq!(file.accepted, 1);
        assert_eq!(file.skipped["non_positive_weight"], 1);
    }

    #[test]
    fn test_malformed_rows_do_not_stop_the_file() {
        let body = "товар;цена;вес\nМолоко;60,5;1\nХлеб;сорок;1\nСыр;;\nСоль;20;1\n";
        let (store, report) = ingest(&[("PRICE_shop.csv", body)]);

        let names: Vec<&str> = store.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Молоко", "Соль"]);
        assert_eq!(report.skipped_total(), 2);
    }

    #[test]
    fn test_unmapped_price_column_contributes_nothing() {
        let (store, report) = ingest(&[
            ("price_a.csv", "name,cost,weight\nMilk,60,2\nTea,100,0.1\n"),
            ("price_b.csv", "name,price,weight\nSalt,20,1\n"),
        ]);

        assert_eq!(store.len(), 1);
        let a = report.file("price_a.csv").unwrap();
        assert!(matches!(a.status, FileStatus::Ingested { delimiter: ',' }));
        assert_eq!(a.mapping.price, None);
        assert_eq!(a.accepted, 0);
        assert_eq!(a.skipped["unmapped_column"], 2);
        assert_eq!(report.rejected_files().count(), 0);
    }

    #[test]
    fn test_dialect_error_skips_whole_file() {
        let (store, report) = ingest(&[
            ("price_bad.csv", "nothing to split here\nor here\n"),
            ("price_ok.csv", "name,price,weight\nMilk,60,2\n"),
        ]);

        assert_eq!(store.len(), 1);
        let bad = report.file("price_bad.csv").unwrap();
        assert!(matches!(bad.status, FileStatus::DialectRejected { .. }));
        assert_eq!(bad.accepted, 0);
        assert_eq!(bad.mapping, ColumnMapping::default());
    }

    #[test]
    fn test_files_without_marker_are_ignored() {
        let (store, report) = ingest(&[
            ("stock.csv", "name,price,weight\nMilk,60,2\n"),
            ("price_1.txt", "name,price,weight\nMilk,60,2\n"),
        ]);
        assert!(store.is_empty());
        assert!(report.files.is_empty());
    }

    #[test]
    fn test_files_are_loaded_in_name_order() {
        let (store, _) = ingest(&[
            ("price_b.csv", "name,price,weight\nMilk,80,1\n"),
            ("price_a.csv", "name,price,weight\nMilk,60,1\n"),
        ]);
        let sources: Vec<&str> = store.iter().map(|e| e.source_file()).collect();
        assert_eq!(sources, vec!["price_a.csv", "price_b.csv"]);
    }
}
