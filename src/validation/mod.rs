pub mod validator;

pub use validator::{validate_questions, ValidationOptions, ValidationResult, Validator, NO_VALID_QUESTIONS};
