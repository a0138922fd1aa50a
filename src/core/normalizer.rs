use crate::domain::model::{ColumnMapping, Field, PriceEntry, RowOutcome, SkipReason};

/// Turns one raw row into a [`RowOutcome`]. Never fails: anything that does
/// not satisfy the [`PriceEntry`] invariants becomes `Skipped` with a reason.
pub fn normalize_row<R>(row: &R, mapping: &ColumnMapping, source_file: &str) -> RowOutcome
where
    R: RowFields + ?Sized,
{
    match build_entry(row, mapping, source_file) {
        Ok(entry) => RowOutcome::Entry(entry),
        Err(reason) => RowOutcome::Skipped(reason),
    }
}

/// Positional field access over a parsed record.
pub trait RowFields {
    fn field(&self, index: usize) -> Option<&str>;
}

impl RowFields for csv::StringRecord {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index)
    }
}

impl<S: AsRef<str>> RowFields for [S] {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(|value| value.as_ref())
    }
}

fn build_entry<R>(
    row: &R,
    mapping: &ColumnMapping,
    source_file: &str,
) -> Result<PriceEntry, SkipReason>
where
    R: RowFields + ?Sized,
{
    let name = value(row, mapping, Field::Name)?;
    let price = parse_number(value(row, mapping, Field::Price)?, Field::Price)?;
    let weight = parse_number(value(row, mapping, Field::Weight)?, Field::Weight)?;

    PriceEntry::new(name, price, weight, source_file)
}

fn value<'r, R>(row: &'r R, mapping: &ColumnMapping, field: Field) -> Result<&'r str, SkipReason>
where
    R: RowFields + ?Sized,
{
    let index = mapping
        .index_of(field)
        .ok_or(SkipReason::UnmappedColumn(field))?;
    row.field(index).ok_or(SkipReason::MissingValue(field))
}

/// Parses a decimal that may use a comma as the separator (`12,5`).
pub fn parse_number(raw: &str, field: Field) -> Result<f64, SkipReason> {
    raw.replace(',', ".")
        .trim()
        .parse::<f64>()
        .map_err(|_| SkipReason::InvalidNumber(field))
}
