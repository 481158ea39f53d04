//! # Book Question Worker
//!
//! 把一本 PDF 书变成逐章的阅读理解选择题，并持久化到外部后端。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 外部协作方（Clients）
//! - `clients/` - 封装两个外部 HTTP 协作方
//! - `BackendClient` - 章节创建 / 题目保存（ChapterStore 能力）
//! - `LlmClient` - 文本生成（TextGenerator 能力）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `PdfService` - 下载 + PDF 文本提取能力
//! - `segmenter` - 分章能力（标题检测 + 长度兜底）
//! - `output_normalizer` - 从 LLM 响应中抠出 JSON 的能力
//! - `QuestionGenerator` - 单章题目生成与校验能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个章节"的完整处理流程
//! - `ChapterCtx` - 上下文封装（book_id + chapter_number）
//! - `ChapterFlow` - 流程编排（创建章节 → 生成 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/book_processor` - 整本书的处理器，
//!   唯一做"中止 vs 跳过"决策的地方
//!
//! ## 失败隔离
//!
//! 提取/分章失败中止整次运行；此后任何失败都只跳过当前章节——
//! 第 7 章遇到服务故障不能丢掉已经持久化的第 1~6 章。

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{BackendClient, ChapterStore, CreateChapterRequest, LlmClient, TextGenerator};
pub use config::Config;
pub use error::{WorkerError, WorkerResult};
pub use models::{BookProcessingInput, Question, QuestionOption, RunResult};
pub use orchestrator::{BookProcessor, BookReport};
pub use services::{PdfService, QuestionGenerator, TextExtractor};
pub use workflow::{ChapterCtx, ChapterFlow, ChapterOutcome};
