//! 书籍处理的输入与运行结果

use serde::{Deserialize, Serialize};

/// 一次书籍处理的输入
///
/// 由外部调用方（后端服务）构造，一次处理消费一次。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookProcessingInput {
    /// 书籍 ID（外部后端的主键）
    pub book_id: i64,
    /// 文档的可下载地址（PDF URL）
    pub document_url: String,
    /// 期望的章节数（长度兜底分章时使用）
    pub total_chapters: u32,
}

/// 一次后台处理的最终结果
///
/// 处理是即发即弃的后台任务，结果只用于日志（以及测试断言）。
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_saved: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    /// 构造成功结果
    pub fn success(total_saved: usize) -> Self {
        Self {
            success: true,
            total_saved: Some(total_saved),
            error: None,
        }
    }

    /// 构造失败结果
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_saved: None,
            error: Some(error.into()),
        }
    }
}
