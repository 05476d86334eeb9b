pub mod csv_loader;

pub use csv_loader::{list_csv_files, load_csv_document, CsvDocument};
