pub mod backend_client;
pub mod llm_client;

pub use backend_client::{BackendClient, ChapterStore, CreateChapterRequest};
pub use llm_client::{LlmClient, TextGenerator};
