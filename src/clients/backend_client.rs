//! 后端 API 客户端
//!
//! 封装与外部存储后端的两个内部接口：创建章节、保存生成的题目。
//! 两个接口都要求 201 Created；任何其他结果都作为错误返回，
//! 由编排层决定跳过本章还是继续。本层不做重试。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{WorkerError, WorkerResult};
use crate::models::Question;

/// 创建章节请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChapterRequest {
    pub book_id: i64,
    pub chapter_number: u32,
    pub title: String,
    pub text: String,
}

/// 创建章节响应（只关心后端分配的章节主键）
#[derive(Debug, Deserialize)]
struct CreateChapterResponse {
    chapter_id: Option<i64>,
}

/// 保存题目请求
#[derive(Debug, Serialize)]
struct SaveQuestionsRequest<'a> {
    book_id: i64,
    questions: &'a [Question],
}

/// 章节与题目的持久化能力
///
/// 抽成 trait 是为了让编排层可以注入替身实现做单元测试。
#[async_trait]
pub trait ChapterStore: Send + Sync {
    /// 创建章节，返回后端分配的章节主键
    async fn create_chapter(&self, request: &CreateChapterRequest) -> WorkerResult<i64>;

    /// 批量保存一个章节生成的题目
    async fn save_questions(&self, book_id: i64, questions: &[Question]) -> WorkerResult<()>;
}

/// 基于 `reqwest` 的后端客户端
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// 创建新的后端客户端
    pub fn new(config: &Config) -> WorkerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| WorkerError::HttpClientInit {
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.backend_api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChapterStore for BackendClient {
    async fn create_chapter(&self, request: &CreateChapterRequest) -> WorkerResult<i64> {
        let url = format!("{}/books/internal/chapters", self.base_url);
        debug!("创建章节: POST {} (章节 {})", url, request.chapter_number);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| WorkerError::ChapterPersist {
                chapter_number: request.chapter_number,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::ChapterPersist {
                chapter_number: request.chapter_number,
                message: format!("HTTP 状态码 {}: {}", status, body),
            });
        }

        let payload: CreateChapterResponse =
            response
                .json()
                .await
                .map_err(|e| WorkerError::ChapterPersist {
                    chapter_number: request.chapter_number,
                    message: format!("响应解析失败: {}", e),
                })?;

        payload.chapter_id.ok_or_else(|| WorkerError::ChapterPersist {
            chapter_number: request.chapter_number,
            message: "后端未返回章节 ID".to_string(),
        })
    }

    async fn save_questions(&self, book_id: i64, questions: &[Question]) -> WorkerResult<()> {
        let url = format!("{}/questions/generated", self.base_url);
        debug!("保存题目: POST {} ({} 道)", url, questions.len());

        let response = self
            .http
            .post(&url)
            .json(&SaveQuestionsRequest { book_id, questions })
            .send()
            .await
            .map_err(|e| WorkerError::QuestionsPersist {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::QuestionsPersist {
                message: format!("HTTP 状态码 {}: {}", status, body),
            });
        }

        Ok(())
    }
}
