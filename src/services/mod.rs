pub mod output_normalizer;
pub mod pdf_service;
pub mod question_generator;
pub mod segmenter;

pub use pdf_service::{PdfService, TextExtractor};
pub use question_generator::{CandidateOutcome, QuestionGenerator};
