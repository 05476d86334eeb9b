pub mod exam;
pub mod loaders;
pub mod question;

pub use exam::{DraftQuestion, Exam, ExamDraft, QuestionImage};
pub use loaders::{list_csv_files, load_csv_document, CsvDocument};
pub use question::{OptionLabel, Question, QuestionType};
