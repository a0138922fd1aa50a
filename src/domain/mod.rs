// Domain layer: canonical records, ports and the header vocabulary.

pub mod model;
pub mod ports;
pub mod vocabulary;
