use crate::core::column_mapper::ColumnMapper;
use crate::core::export::export_html;
use crate::core::ingest::Ingestor;
use crate::core::search::search;
use crate::core::sniffer::DialectSniffer;
use crate::core::store::PriceStore;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{ExportSummary, IngestReport, PriceEntry};
use crate::utils::error::Result;
use std::path::Path;

/// Owns the dataset of one run and exposes the read-only operations the
/// interactive driver issues against it.
pub struct PriceEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    ingestor: Ingestor,
    store: PriceStore,
}

impl<S: Storage, C: ConfigProvider> PriceEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let ingestor = Ingestor::new(
            DialectSniffer::new(config.sample_bytes()),
            ColumnMapper::new(config.vocabulary()),
        );
        Self {
            storage,
            config,
            ingestor,
            store: PriceStore::new(),
        }
    }

    /// Runs the ingestion pass over the configured directory. The store is
    /// rebuilt from scratch, so calling this twice does not duplicate entries.
    pub fn load_prices(&mut self) -> Result<IngestReport> {
        tracing::info!(
            "Scanning {} for '{}' .{} files",
            self.config.prices_dir(),
            self.config.file_marker(),
            self.config.file_extension()
        );

        let mut store = PriceStore::new();
        let report = self.ingestor.ingest_dir(
            &self.storage,
            Path::new(self.config.prices_dir()),
            self.config.file_marker(),
            self.config.file_extension(),
            &mut store,
        )?;
        self.store = store;
        Ok(report)
    }

    pub fn find_text(&self, fragment: &str) -> Vec<&PriceEntry> {
        let results = search(&self.store, fragment);
        tracing::debug!("Search {:?}: {} matches", fragment, results.len());
        results
    }

    pub fn export_to_html(&self) -> Result<ExportSummary> {
        self.export_to(Path::new(self.config.output_path()))
    }

    pub fn export_to(&self, path: &Path) -> Result<ExportSummary> {
        export_html(&self.storage, &self.store, path, self.config.export_title())
    }

    pub fn store(&self) -> &PriceStore {
        &self.store
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}
