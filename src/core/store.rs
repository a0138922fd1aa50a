use crate::domain::model::PriceEntry;

/// Append-only collection of every entry loaded during one run.
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    entries: Vec<PriceEntry>,
}

impl PriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: PriceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
