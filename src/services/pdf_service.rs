//! 文本提取服务 - 业务能力层
//!
//! 只负责"把文档 URL 变成纯文本"这一件事：
//! 下载 PDF 字节流，用 `pdf-extract` 提取文本层，按页序拼接。
//!
//! 本层不做重试，重试（如果需要）是编排层的事。

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{WorkerError, WorkerResult};

/// 文本提取能力
///
/// 抽成 trait 是为了让编排层可以注入替身实现做单元测试。
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// 根据文档 URL 提取全文纯文本
    async fn extract_text(&self, document_url: &str) -> WorkerResult<String>;
}

/// 基于 `reqwest` + `pdf-extract` 的 PDF 文本提取服务
pub struct PdfService {
    http: reqwest::Client,
}

impl PdfService {
    /// 创建新的 PDF 提取服务
    ///
    /// # 参数
    /// - `timeout`: 整个下载请求的超时时间
    pub fn new(timeout: Duration) -> WorkerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkerError::HttpClientInit {
                message: e.to_string(),
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl TextExtractor for PdfService {
    async fn extract_text(&self, document_url: &str) -> WorkerResult<String> {
        info!("📥 开始下载文档: {}", document_url);

        let response = self
            .http
            .get(document_url)
            .send()
            .await
            .map_err(|e| WorkerError::Fetch {
                url: document_url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(WorkerError::Fetch {
                url: document_url.to_string(),
                message: format!("HTTP 状态码 {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| WorkerError::Fetch {
            url: document_url.to_string(),
            message: e.to_string(),
        })?;

        debug!("文档下载完成，共 {} 字节", bytes.len());

        // pdf-extract 是同步的 CPU 密集操作，放到阻塞线程池里执行
        let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| WorkerError::PdfParse {
                message: e.to_string(),
            })?
            .map_err(|e| WorkerError::PdfParse {
                message: e.to_string(),
            })?;

        let full_text = assemble_pages(&raw, document_url)?;

        info!("✓ 文本提取完成，共 {} 字符", full_text.chars().count());
        Ok(full_text)
    }
}

/// 把 pdf-extract 的原始输出整理成全文
///
/// pdf-extract 在页与页之间插入换页符（\x0C）：按页切开、去首尾空白、
/// 丢弃空页，再以空行重新拼接。整理后仍为空说明文档没有文本层
/// （扫描版/纯图片 PDF），返回 `EmptyDocument`，与下载失败区分开。
fn assemble_pages(raw: &str, document_url: &str) -> WorkerResult<String> {
    let full_text = raw
        .split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if full_text.is_empty() {
        warn!("⚠️ 文档没有可提取的文本层: {}", document_url);
        return Err(WorkerError::EmptyDocument {
            url: document_url.to_string(),
        });
    }

    Ok(full_text)
}
