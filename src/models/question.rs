//! 题目数据模型
//!
//! `chapter_id` 是后端在章节创建成功后分配的主键，
//! 与分章得到的本地章节序号（chapter_number）是两回事，不能混用。

use serde::{Deserialize, Serialize};

/// 理解层次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComprehensionLevel {
    /// 字面理解（直接事实）
    #[default]
    Literal,
    /// 推断理解（推理得出）
    Inferential,
    /// 评价理解（判断/评价）
    Critical,
}

/// 题型（目前只有选择题）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
}

/// 选项
///
/// 期望（但不强制校验）：同一道题的选项中恰好一个 `is_correct` 为 true。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

/// 一道已通过校验的选择题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 后端分配的章节主键（不是本地章节序号）
    pub chapter_id: i64,
    /// 理解层次，候选缺失时默认 literal
    #[serde(default)]
    pub comprehension_level: ComprehensionLevel,
    /// 题干
    pub statement: String,
    /// 题型，候选缺失时默认 multiple_choice
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// 选项（有序）
    pub options: Vec<QuestionOption>,
}
