//! 书籍处理器 - 编排层
//!
//! ## 核心流程
//!
//! 1. 提取全文 —— 失败即中止整次运行
//! 2. 分章 —— 结果为空即中止
//! 3. 逐章（升序、严格串行）执行 ChapterFlow，章节之间固定暂停，
//!    避免对 LLM 服务造成突发压力
//! 4. 汇总报告：只要走到了逐章阶段，整次运行就算成功，
//!    个别章节被跳过不影响 success 标志

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{BackendClient, ChapterStore, LlmClient, TextGenerator};
use crate::config::Config;
use crate::error::{WorkerError, WorkerResult};
use crate::models::{BookProcessingInput, RunResult};
use crate::services::{segmenter, PdfService, QuestionGenerator, TextExtractor};
use crate::workflow::{ChapterCtx, ChapterFlow, ChapterOutcome};

/// 整本书的处理报告
///
/// 每章一条结果，success / total_saved 由报告汇总得出。
#[derive(Debug, Default)]
pub struct BookReport {
    pub outcomes: Vec<(u32, ChapterOutcome)>,
}

impl BookReport {
    /// 成功保存的题目总数
    pub fn total_saved(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                ChapterOutcome::Persisted(count) => *count,
                ChapterOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    /// 完整持久化的章节数
    pub fn persisted_chapters(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ChapterOutcome::Persisted(_)))
            .count()
    }

    /// 被跳过的章节数
    pub fn skipped_chapters(&self) -> usize {
        self.outcomes.len() - self.persisted_chapters()
    }
}

/// 书籍处理器
pub struct BookProcessor {
    extractor: Arc<dyn TextExtractor>,
    flow: ChapterFlow,
    chapter_pause: Duration,
}

impl BookProcessor {
    /// 用注入的协作方创建处理器
    ///
    /// # 参数
    /// - `extractor`: 文本提取能力
    /// - `store`: 章节与题目的持久化能力
    /// - `text_generator`: 文本生成客户端
    /// - `config`: 配置（温度、章节间暂停）
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        store: Arc<dyn ChapterStore>,
        text_generator: Arc<dyn TextGenerator>,
        config: &Config,
    ) -> Self {
        let generator = QuestionGenerator::new(text_generator, config.llm_temperature);
        Self {
            extractor,
            flow: ChapterFlow::new(store, generator, config.verbose_logging),
            chapter_pause: Duration::from_millis(config.chapter_pause_ms),
        }
    }

    /// 用真实协作方（PDF 下载 + 后端 + LLM）创建处理器
    pub fn from_config(config: &Config) -> WorkerResult<Self> {
        let extractor = Arc::new(PdfService::new(Duration::from_secs(
            config.fetch_timeout_secs,
        ))?);
        let store = Arc::new(BackendClient::new(config)?);
        let llm = Arc::new(LlmClient::new(config));
        Ok(Self::new(extractor, store, llm, config))
    }

    /// 处理一本书并返回运行结果（顶层兜底）
    ///
    /// `process` 抛出的任何错误都在这里转成 `{success: false, error}`，
    /// 不会继续向后台任务调度器传播。
    pub async fn run(&self, input: BookProcessingInput) -> RunResult {
        match self.process(&input).await {
            Ok(report) => {
                info!(
                    "[书籍 {}] ✅ 处理完成: 持久化 {} 章, 跳过 {} 章, 共保存 {} 道题目",
                    input.book_id,
                    report.persisted_chapters(),
                    report.skipped_chapters(),
                    report.total_saved()
                );
                RunResult::success(report.total_saved())
            }
            Err(e) => {
                error!("[书籍 {}] ❌ 处理失败: {}", input.book_id, e);
                RunResult::failure(e.to_string())
            }
        }
    }

    /// 核心处理流程：提取 → 分章 → 逐章处理
    async fn process(&self, input: &BookProcessingInput) -> WorkerResult<BookReport> {
        info!(
            "[书籍 {}] 🚀 开始处理，目标章节数: {}",
            input.book_id, input.total_chapters
        );

        // 第 1 步：提取全文（失败中止整次运行）
        let full_text = self.extractor.extract_text(&input.document_url).await?;

        // 第 2 步：分章（空结果中止）
        let chapters = segmenter::segment_chapters(&full_text, input.total_chapters);
        if chapters.is_empty() {
            return Err(WorkerError::SegmentationEmpty);
        }

        let total = chapters.len();
        info!("[书籍 {}] ✓ 分章完成，共 {} 章", input.book_id, total);

        // 第 3 步：逐章处理（升序、严格串行，失败只跳过本章）
        let mut report = BookReport::default();

        for (index, (chapter_number, chapter_text)) in chapters.iter().enumerate() {
            info!(
                "[书籍 {}] {}",
                input.book_id,
                "─".repeat(30)
            );
            info!(
                "[书籍 {}] 处理第 {}/{} 章",
                input.book_id, chapter_number, total
            );

            let ctx = ChapterCtx::new(input.book_id, *chapter_number, total);
            let outcome = self.flow.run(&ctx, chapter_text).await;
            report.outcomes.push((*chapter_number, outcome));

            // 章节间固定暂停，最后一章之后不再等待
            if index + 1 < total {
                tokio::time::sleep(self.chapter_pause).await;
            }
        }

        Ok(report)
    }
}

/// 以后台任务方式启动一次书籍处理（即发即弃）
///
/// 触发方拿到的是 `JoinHandle`，可以选择 await 也可以直接丢弃；
/// 运行结果总会写入日志。
pub fn spawn(processor: Arc<BookProcessor>, input: BookProcessingInput) -> JoinHandle<RunResult> {
    tokio::spawn(async move {
        let book_id = input.book_id;
        let result = processor.run(input).await;
        match serde_json::to_string(&result) {
            Ok(json) => info!("[书籍 {}] 后台运行结束: {}", book_id, json),
            Err(_) => info!("[书籍 {}] 后台运行结束", book_id),
        }
        result
    })
}
