//! 错误类型定义
//!
//! 按处理阶段划分错误：提取阶段的错误会中止整本书的处理，
//! 持久化/生成阶段的错误只影响单个章节（由编排层决定跳过还是中止）。

use thiserror::Error;

/// Worker 错误类型
#[derive(Debug, Error)]
pub enum WorkerError {
    /// 下载文档失败（网络错误、超时或非 2xx 状态码）
    #[error("下载文档失败 ({url}): {message}")]
    Fetch { url: String, message: String },

    /// 文档没有可提取的文本层（通常是扫描版 PDF）
    #[error("文档没有可提取的文本层: {url}")]
    EmptyDocument { url: String },

    /// PDF 字节流解析失败
    #[error("PDF 解析失败: {message}")]
    PdfParse { message: String },

    /// 分章结果为空，没有可处理的内容
    #[error("分章结果为空，没有可处理的内容")]
    SegmentationEmpty,

    /// 创建章节失败（后端未返回 201 或未返回章节 ID）
    #[error("创建章节失败 (章节 {chapter_number}): {message}")]
    ChapterPersist { chapter_number: u32, message: String },

    /// 保存题目失败
    #[error("保存题目失败: {message}")]
    QuestionsPersist { message: String },

    /// LLM 调用失败
    #[error("LLM 调用失败: {message}")]
    Llm { message: String },

    /// HTTP 客户端初始化失败
    #[error("HTTP 客户端初始化失败: {message}")]
    HttpClientInit { message: String },
}

/// Worker 结果类型别名
pub type WorkerResult<T> = Result<T, WorkerError>;
