//! Orchestration services: import reconciliation, export pagination, facade.

pub mod export;
pub mod facade;
pub mod import;

pub use export::Exporter;
pub use facade::CsvTransfer;
pub use import::Importer;
