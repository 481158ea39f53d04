//! 章节处理流程 - 流程层
//!
//! 核心职责：定义"一个章节"的完整处理流程
//!
//! 流程顺序：
//! 1. 创建章节（拿到后端分配的章节 ID）
//! 2. 用真实章节 ID 生成题目
//! 3. 保存题目
//!
//! 任何一步失败都变成 `ChapterOutcome::Skipped`，绝不向上抛错——
//! 第 7 章的失败不能丢掉已经持久化的第 1~6 章。

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clients::{ChapterStore, CreateChapterRequest};
use crate::services::QuestionGenerator;
use crate::utils::logging::truncate_text;
use crate::workflow::chapter_ctx::ChapterCtx;

/// 单个章节的处理结果
///
/// 把"失败就跳过、继续循环"从散落的 continue 变成显式的数据结构，
/// 编排层据此汇总统计。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterOutcome {
    /// 章节与题目均已持久化，附成功保存的题目数
    Persisted(usize),
    /// 本章被跳过及原因
    Skipped { reason: String },
}

/// 章节处理流程
///
/// - 编排单个章节的 创建 → 生成 → 保存 三步
/// - 不持有 HTTP 资源本身，只依赖注入的能力
pub struct ChapterFlow {
    store: Arc<dyn ChapterStore>,
    generator: QuestionGenerator,
    verbose_logging: bool,
}

impl ChapterFlow {
    /// 创建新的章节处理流程
    pub fn new(
        store: Arc<dyn ChapterStore>,
        generator: QuestionGenerator,
        verbose_logging: bool,
    ) -> Self {
        Self {
            store,
            generator,
            verbose_logging,
        }
    }

    /// 处理一个章节
    pub async fn run(&self, ctx: &ChapterCtx, chapter_text: &str) -> ChapterOutcome {
        if self.verbose_logging {
            info!(
                "[书籍 {}] 章节 {}/{} 内容预览: {}",
                ctx.book_id,
                ctx.chapter_number,
                ctx.total_chapters,
                truncate_text(chapter_text, 80)
            );
        }

        // ========== 第 1 步：创建章节，拿到后端分配的 ID ==========
        let request = CreateChapterRequest {
            book_id: ctx.book_id,
            chapter_number: ctx.chapter_number,
            title: format!("Chapter {}", ctx.chapter_number),
            text: chapter_text.to_string(),
        };

        let chapter_id = match self.store.create_chapter(&request).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    "[书籍 {}] ❌ 章节 {} 创建失败，跳过本章: {}",
                    ctx.book_id, ctx.chapter_number, e
                );
                return ChapterOutcome::Skipped {
                    reason: format!("创建章节失败: {}", e),
                };
            }
        };

        info!(
            "[书籍 {}] ✓ 章节 {} 已创建 (chapter_id: {})",
            ctx.book_id, ctx.chapter_number, chapter_id
        );

        // ========== 第 2 步：生成题目（使用真实的 chapter_id，不是本地序号） ==========
        let questions = self
            .generator
            .generate_for_chapter(chapter_text, chapter_id)
            .await;

        if questions.is_empty() {
            warn!(
                "[书籍 {}] ⚠️ 章节 {} 未生成有效题目，跳到下一章",
                ctx.book_id, ctx.chapter_number
            );
            return ChapterOutcome::Skipped {
                reason: "未生成有效题目".to_string(),
            };
        }

        info!(
            "[书籍 {}] ✓ 章节 {} 生成了 {} 道题目",
            ctx.book_id,
            ctx.chapter_number,
            questions.len()
        );

        // ========== 第 3 步：保存题目（失败不回滚已创建的章节文本） ==========
        match self.store.save_questions(ctx.book_id, &questions).await {
            Ok(()) => {
                info!(
                    "[书籍 {}] ✓ 章节 {} 的题目已保存",
                    ctx.book_id, ctx.chapter_number
                );
                ChapterOutcome::Persisted(questions.len())
            }
            Err(e) => {
                error!(
                    "[书籍 {}] ❌ 章节 {} 的题目保存失败: {}",
                    ctx.book_id, ctx.chapter_number, e
                );
                ChapterOutcome::Skipped {
                    reason: format!("保存题目失败: {}", e),
                }
            }
        }
    }
}
