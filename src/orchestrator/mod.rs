//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整本书的处理调度，是"中止还是跳过"决策的唯一场所：
//!
//! - 提取失败 / 分章为空 → 整次运行失败；
//! - 分章之后的一切失败 → 只跳过当前章节，继续处理下一章。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::BookProcessor (处理整本书)
//!     ↓
//! workflow::ChapterFlow (处理单个章节)
//!     ↓
//! services (能力层：pdf / segmenter / question_generator)
//!     ↓
//! clients (外部协作方：backend / llm)
//! ```

pub mod book_processor;

pub use book_processor::{spawn, BookProcessor, BookReport};
