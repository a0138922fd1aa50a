use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Canonical record for one product row.
///
/// Fields are private so the invariants checked by [`PriceEntry::new`] hold for
/// the lifetime of the value; price per kilogram is derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEntry {
    name: String,
    price: f64,
    weight: f64,
    source_file: String,
}

impl PriceEntry {
    /// Returns `Err` with the violated invariant when the values cannot form
    /// a canonical record.
    pub fn new(
        name: &str,
        price: f64,
        weight: f64,
        source_file: &str,
    ) -> std::result::Result<Self, SkipReason> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SkipReason::EmptyName);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(SkipReason::NonPositivePrice);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(SkipReason::NonPositiveWeight);
        }

        Ok(Self {
            name: name.to_string(),
            price,
            weight,
            source_file: source_file.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn price_per_unit_weight(&self) -> f64 {
        self.price / self.weight
    }
}

/// Logical column of a price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    Name,
    Price,
    Weight,
}

impl Field {
    /// Precedence used when one header token belongs to several synonym sets.
    pub const PRIORITY: [Field; 3] = [Field::Name, Field::Price, Field::Weight];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Weight => "weight",
        };
        f.write_str(label)
    }
}

/// Column indices resolved from a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub name: Option<usize>,
    pub price: Option<usize>,
    pub weight: Option<usize>,
}

impl ColumnMapping {
    pub fn index_of(&self, field: Field) -> Option<usize> {
        match field {
            Field::Name => self.name,
            Field::Price => self.price,
            Field::Weight => self.weight,
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::PRIORITY
            .into_iter()
            .filter(|field| self.index_of(*field).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Why a data row did not become a [`PriceEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SkipReason {
    /// The header row has no column for this field.
    UnmappedColumn(Field),
    /// The row is shorter than the mapped column index.
    MissingValue(Field),
    InvalidNumber(Field),
    EmptyName,
    NonPositivePrice,
    NonPositiveWeight,
    /// The reader could not decode the record at all.
    MalformedRecord,
}

impl SkipReason {
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::UnmappedColumn(_) => "unmapped_column",
            SkipReason::MissingValue(_) => "missing_value",
            SkipReason::InvalidNumber(_) => "invalid_number",
            SkipReason::EmptyName => "empty_name",
            SkipReason::NonPositivePrice => "non_positive_price",
            SkipReason::NonPositiveWeight => "non_positive_weight",
            SkipReason::MalformedRecord => "malformed_record",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnmappedColumn(field) => write!(f, "no {} column in header", field),
            SkipReason::MissingValue(field) => write!(f, "row has no {} value", field),
            SkipReason::InvalidNumber(field) => write!(f, "{} is not a number", field),
            SkipReason::EmptyName => f.write_str("name is empty"),
            SkipReason::NonPositivePrice => f.write_str("price must be positive"),
            SkipReason::NonPositiveWeight => f.write_str("weight must be positive"),
            SkipReason::MalformedRecord => f.write_str("record could not be read"),
        }
    }
}

/// Result of normalizing one data row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Entry(PriceEntry),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FileStatus {
    Ingested { delimiter: char },
    DialectRejected { reason: String },
}

/// Per-file ingestion summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub status: FileStatus,
    pub mapping: ColumnMapping,
    pub accepted: usize,
    pub skipped: BTreeMap<&'static str, usize>,
}

impl FileReport {
    pub fn new(file: &str, status: FileStatus) -> Self {
        Self {
            file: file.to_string(),
            status,
            mapping: ColumnMapping::default(),
            accepted: 0,
            skipped: BTreeMap::new(),
        }
    }

    pub fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.kind()).or_insert(0) += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub files: Vec<FileReport>,
}

impl IngestReport {
    pub fn accepted_total(&self) -> usize {
        self.files.iter().map(|f| f.accepted).sum()
    }

    pub fn skipped_total(&self) -> usize {
        self.files.iter().map(FileReport::skipped_total).sum()
    }

    pub fn rejected_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::DialectRejected { .. }))
    }

    pub fn file(&self, name: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.file == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: std::path::PathBuf,
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_entry_derives_ratio() {
        let entry = PriceEntry::new("  Milk ", 60.0, 2.0, "price_1.csv").unwrap();
        assert_eq!(entry.name(), "Milk");
        assert!((entry.price_per_unit_weight() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_entry_rejects_invalid_values() {
        assert_eq!(
            PriceEntry::new("Bread", 40.0, 0.0, "f").unwrap_err(),
            SkipReason::NonPositiveWeight
        );
        assert_eq!(
            PriceEntry::new("Bread", -1.0, 1.0, "f").unwrap_err(),
            SkipReason::NonPositivePrice
        );
        assert_eq!(
            PriceEntry::new("   ", 1.0, 1.0, "f").unwrap_err(),
            SkipReason::EmptyName
        );
        assert_eq!(
            PriceEntry::new("Salt", 1.0, f64::NAN, "f").unwrap_err(),
            SkipReason::NonPositiveWeight
        );
    }

    #[test]
    fn test_column_mapping_missing_fields() {
        let mapping = ColumnMapping {
            name: Some(0),
            price: None,
            weight: Some(2),
        };
        assert_eq!(mapping.missing_fields(), vec![Field::Price]);
        assert!(!mapping.is_complete());
    }

    #[test]
    fn test_file_report_counts_skips_by_kind() {
        let mut report = FileReport::new("price_1.csv", FileStatus::Ingested { delimiter: ',' });
        report.record_skip(&SkipReason::NonPositiveWeight);
        report.record_skip(&SkipReason::NonPositiveWeight);
        report.record_skip(&SkipReason::InvalidNumber(Field::Price));
        assert_eq!(report.skipped_total(), 3);
        assert_eq!(report.skipped["non_positive_weight"], 2);
    }
}
