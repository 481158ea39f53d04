//! 题目生成服务 - 业务能力层
//!
//! 给定一个章节的文本和后端分配的章节 ID，产出 0~3 道已校验的选择题。
//!
//! 设计成"按章节优雅降级"：章节文本为空、LLM 调用失败、
//! 或没有任何候选通过校验时都返回空列表而不是错误，
//! 让编排层可以跳过这一章继续处理整本书。

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::clients::TextGenerator;
use crate::models::Question;
use crate::services::output_normalizer;

/// 每章最多保留的题目数
const MAX_QUESTIONS_PER_CHAPTER: usize = 3;

/// 单个候选的校验结果
///
/// 用显式的带标签结果代替静默吞异常，调用方可以逐条上报拒绝原因。
#[derive(Debug)]
pub enum CandidateOutcome {
    /// 通过校验的题目
    Parsed(Question),
    /// 被拒绝的候选及原因
    Rejected { reason: String },
}

/// 题目生成服务
pub struct QuestionGenerator {
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
}

impl QuestionGenerator {
    /// 创建题目生成服务
    ///
    /// # 参数
    /// - `generator`: 文本生成客户端（由调用方显式构造并注入）
    /// - `temperature`: 采样温度，取较低值以稳定输出格式
    pub fn new(generator: Arc<dyn TextGenerator>, temperature: f32) -> Self {
        Self {
            generator,
            temperature,
        }
    }

    /// 为一个章节生成题目
    ///
    /// # 参数
    /// - `chapter_text`: 章节文本
    /// - `chapter_id`: 后端分配的章节主键（所有题目强制使用该值）
    ///
    /// # 返回
    /// 0~3 道通过校验的题目；任何失败都退化为空列表，不向上抛错
    pub async fn generate_for_chapter(&self, chapter_text: &str, chapter_id: i64) -> Vec<Question> {
        if chapter_text.trim().is_empty() {
            debug!("章节文本为空，跳过生成 (chapter_id: {})", chapter_id);
            return Vec::new();
        }

        let prompt = build_prompt(chapter_text, chapter_id);

        let raw = match self.generator.generate(&prompt, self.temperature).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("⚠️ 题目生成调用失败 (chapter_id: {}): {}", chapter_id, e);
                return Vec::new();
            }
        };

        parse_questions(&raw, chapter_id)
    }
}

/// 构建出题提示词
///
/// 一次调用要求恰好 3 道题，字面/推断/评价各一道，只返回 JSON 数组。
fn build_prompt(chapter_text: &str, chapter_id: i64) -> String {
    format!(
        r#"仅根据下面提供的章节文本，生成恰好 3 道选择题：
1. 一道字面理解题（literal，考查文中直接陈述的事实）。
2. 一道推断理解题（inferential，考查需要推理得出的结论）。
3. 一道评价理解题（critical，考查对主题的判断与评价）。

要求：
- 每道题提供 3 个选项，恰好一个选项的 is_correct 为 true，另外两个是合理的干扰项。
- chapter_id 字段必须始终为 {chapter_id}。
- 只返回一个 JSON 数组，不要输出任何解释性文字。数组元素的形状为：
  {{"chapter_id": {chapter_id}, "comprehension_level": "literal|inferential|critical", "statement": "...", "type": "multiple_choice", "options": [{{"text": "...", "is_correct": true}}]}}

待出题的章节文本：
---
{chapter_text}
---"#
    )
}

/// 解析并校验 LLM 的原始响应
///
/// 先归一化出 JSON 值，再逐条校验候选；单个候选畸形只丢弃它自己，
/// 不影响同批次的其他候选。
pub fn parse_questions(raw: &str, chapter_id: i64) -> Vec<Question> {
    let Some(value) = output_normalizer::extract_json_value(raw) else {
        warn!("⚠️ 响应中没有可解析的 JSON，本章不产出题目");
        return Vec::new();
    };

    let candidates = output_normalizer::candidate_array(&value);
    let mut questions = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        match validate_candidate(candidate, chapter_id) {
            CandidateOutcome::Parsed(question) => questions.push(question),
            CandidateOutcome::Rejected { reason } => {
                warn!("⚠️ 丢弃第 {} 个候选: {}", index + 1, reason);
            }
        }
        if questions.len() >= MAX_QUESTIONS_PER_CHAPTER {
            break;
        }
    }

    debug!(
        "候选 {} 个，通过校验 {} 个 (chapter_id: {})",
        candidates.len(),
        questions.len(),
        chapter_id
    );
    questions
}

/// 校验单个候选并强制转换为类型化的题目
///
/// - chapter_id 一律覆盖为调用方提供的值，不信任模型回显的 ID；
/// - options 是纯字符串数组时无法判定正确项，整条拒绝；
/// - comprehension_level / type 缺失时由 serde 默认值补齐。
pub fn validate_candidate(candidate: &Value, chapter_id: i64) -> CandidateOutcome {
    let Some(obj) = candidate.as_object() else {
        return CandidateOutcome::Rejected {
            reason: "候选不是 JSON 对象".to_string(),
        };
    };

    let mut obj = obj.clone();
    obj.insert("chapter_id".to_string(), json!(chapter_id));

    if let Some(Value::Array(options)) = obj.get("options") {
        if options.iter().any(Value::is_string) {
            return CandidateOutcome::Rejected {
                reason: "options 是纯字符串数组，无法判定正确项".to_string(),
            };
        }
    }

    match serde_json::from_value::<Question>(Value::Object(obj)) {
        Ok(question) => CandidateOutcome::Parsed(question),
        Err(e) => CandidateOutcome::Rejected {
            reason: format!("字段校验失败: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComprehensionLevel;

    #[test]
    fn test_validate_candidate_overwrites_chapter_id() {
        // 模型回显了错误的 chapter_id，必须被调用方的值覆盖
        let candidate = json!({
            "chapter_id": 999,
            "comprehension_level": "literal",
            "statement": "文中提到了哪条河流？",
            "type": "multiple_choice",
            "options": [
                {"text": "长江", "is_correct": true},
                {"text": "黄河", "is_correct": false}
            ]
        });

        match validate_candidate(&candidate, 42) {
            CandidateOutcome::Parsed(q) => assert_eq!(q.chapter_id, 42),
            CandidateOutcome::Rejected { reason } => panic!("不应被拒绝: {}", reason),
        }
    }

    #[test]
    fn test_validate_candidate_rejects_plain_string_options() {
        let candidate = json!({
            "statement": "哪个选项正确？",
            "options": ["A", "B"]
        });

        match validate_candidate(&candidate, 1) {
            CandidateOutcome::Rejected { reason } => assert!(reason.contains("纯字符串")),
            CandidateOutcome::Parsed(_) => panic!("纯字符串选项应被拒绝"),
        }
    }

    #[test]
    fn test_validate_candidate_defaults_missing_fields() {
        let candidate = json!({
            "statement": "故事发生在哪里？",
            "options": [{"text": "山村", "is_correct": true}]
        });

        match validate_candidate(&candidate, 7) {
            CandidateOutcome::Parsed(q) => {
                assert_eq!(q.comprehension_level, ComprehensionLevel::Literal);
                assert_eq!(q.chapter_id, 7);
            }
            CandidateOutcome::Rejected { reason } => panic!("不应被拒绝: {}", reason),
        }
    }

    #[test]
    fn test_validate_candidate_rejects_non_object() {
        assert!(matches!(
            validate_candidate(&json!("not an object"), 1),
            CandidateOutcome::Rejected { .. }
        ));
    }

    #[test]
    fn test_parse_questions_bad_candidate_keeps_siblings() {
        // 一个畸形候选不应拖累同批次的有效候选
        let raw = r#"好的，结果如下：
[
  {"statement": "第一题", "options": [{"text": "对", "is_correct": true}]},
  {"statement": "第二题", "options": ["A", "B"]},
  {"statement": "第三题", "options": [{"text": "错", "is_correct": false}, {"text": "对", "is_correct": true}]}
]"#;

        let questions = parse_questions(raw, 5);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.chapter_id == 5));
    }

    #[test]
    fn test_parse_questions_caps_at_three() {
        let raw = r#"[
            {"statement": "1", "options": [{"text": "a", "is_correct": true}]},
            {"statement": "2", "options": [{"text": "a", "is_correct": true}]},
            {"statement": "3", "options": [{"text": "a", "is_correct": true}]},
            {"statement": "4", "options": [{"text": "a", "is_correct": true}]}
        ]"#;
        assert_eq!(parse_questions(raw, 1).len(), 3);
    }

    #[test]
    fn test_parse_questions_prose_yields_empty() {
        assert!(parse_questions("抱歉，我做不到。", 1).is_empty());
    }

    #[test]
    fn test_parse_questions_object_with_questions_field() {
        let raw = r#"{"questions": [{"statement": "唯一一题", "options": [{"text": "a", "is_correct": true}]}]}"#;
        assert_eq!(parse_questions(raw, 1).len(), 1);
    }

    #[test]
    fn test_build_prompt_contains_chapter_id_and_text() {
        let prompt = build_prompt("章节正文", 17);
        assert!(prompt.contains("17"));
        assert!(prompt.contains("章节正文"));
        assert!(prompt.contains("JSON"));
    }
}
