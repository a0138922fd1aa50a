use serde::{Deserialize, Serialize};

/// Header synonym sets, one per logical column. Kept as data so new
/// spellings or languages only need a config change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub weight: Vec<String>,
}

const NAME_SYNONYMS: &[&str] = &[
    "название",
    "продукт",
    "товар",
    "наименование",
    "name",
    "product",
    "item",
];
const PRICE_SYNONYMS: &[&str] = &["цена", "розница", "price", "retail"];
const WEIGHT_SYNONYMS: &[&str] = &["фасовка", "масса", "вес", "weight", "mass", "pack size"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            name: owned(NAME_SYNONYMS),
            price: owned(PRICE_SYNONYMS),
            weight: owned(WEIGHT_SYNONYMS),
        }
    }
}

/// Partial override read from configuration; unset sets keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyOverride {
    pub name: Option<Vec<String>>,
    pub price: Option<Vec<String>>,
    pub weight: Option<Vec<String>>,
}

impl VocabularyOverride {
    pub fn resolve(&self) -> Vocabulary {
        let defaults = Vocabulary::default();
        Vocabulary {
            name: self.name.clone().unwrap_or(defaults.name),
            price: self.price.clone().unwrap_or(defaults.price),
            weight: self.weight.clone().unwrap_or(defaults.weight),
        }
    }
}
