pub mod column_mapper;
pub mod discovery;
pub mod engine;
pub mod export;
pub mod ingest;
pub mod normalizer;
pub mod search;
pub mod sniffer;
pub mod store;

pub use crate::domain::model::{PriceEntry, RowOutcome, SkipReason};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
