use crate::domain::model::{ColumnMapping, Field};
use crate::domain::vocabulary::Vocabulary;
use std::collections::HashMap;

/// Header token -> field lookup built once from a [`Vocabulary`].
///
/// A token listed in several synonym sets belongs to the field that comes
/// first in [`Field::PRIORITY`] (name, then price, then weight).
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    lookup: HashMap<String, Field>,
}

impl ColumnMapper {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let mut lookup = HashMap::new();
        for field in Field::PRIORITY {
            let synonyms = match field {
                Field::Name => &vocabulary.name,
                Field::Price => &vocabulary.price,
                Field::Weight => &vocabulary.weight,
            };
            for synonym in synonyms {
                let token = normalize_header(synonym);
                if token.is_empty() {
                    continue;
                }
                lookup.entry(token).or_insert(field);
            }
        }
        Self { lookup }
    }

    pub fn field_for(&self, header: &str) -> Option<Field> {
        self.lookup.get(&normalize_header(header)).copied()
    }

    /// Resolves column indices from a header row. The first header matching
    /// a field wins; later duplicates and unknown headers are ignored.
    pub fn map_headers<'a, I>(&self, headers: I) -> ColumnMapping
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping = ColumnMapping::default();
        for (index, header) in headers.into_iter().enumerate() {
            let slot = match self.field_for(header) {
                Some(Field::Name) => &mut mapping.name,
                Some(Field::Price) => &mut mapping.price,
                Some(Field::Weight) => &mut mapping.weight,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        mapping
    }
}

impl Default for ColumnMapper {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}
