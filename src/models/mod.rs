pub mod book;
pub mod question;

pub use book::{BookProcessingInput, RunResult};
pub use question::{ComprehensionLevel, Question, QuestionOption, QuestionType};
