pub mod exam_store;
pub mod import_service;
pub mod sample;

pub use exam_store::{ApiExamStore, ExamStore, SaveReceipt, StoreBackend, TomlExamStore};
pub use import_service::{ImportReport, ImportService};
pub use sample::{write_sample, SAMPLE_CSV};
