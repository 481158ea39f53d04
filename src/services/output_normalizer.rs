//! 生成文本归一化 - 业务能力层
//!
//! LLM 虽然被要求"只返回 JSON 数组"，但经常把 JSON 包在解释性文字里。
//! 本模块从原始响应中尽力抠出一个可解析的 JSON 值；
//! 全部策略都失败返回 `None`——这是正常的预期结果，不是异常。

use serde_json::Value;
use tracing::debug;

/// 从原始响应文本中提取 JSON 值
///
/// 策略按序尝试，先成功者胜：
/// 1. 整段文本直接解析；
/// 2. 取第一个 `[` 到最后一个 `]` 的贪婪跨行片段解析；
/// 3. 取第一个 `{` 到最后一个 `}` 的贪婪跨行片段解析。
pub fn extract_json_value(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(value) = parse_span(raw, '[', ']') {
        return Some(value);
    }

    if let Some(value) = parse_span(raw, '{', '}') {
        return Some(value);
    }

    debug!("响应中未找到可解析的 JSON 片段");
    None
}

/// 取 `open` 首次出现到 `close` 最后出现之间的片段尝试解析
fn parse_span(raw: &str, open: char, close: char) -> Option<Value> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if start >= end {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

/// 把提取出的 JSON 值转成候选题目数组
///
/// 数组直接用；对象取其 `questions` 字段，缺失时得到空数组。
pub fn candidate_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(obj) => obj
            .get("questions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
