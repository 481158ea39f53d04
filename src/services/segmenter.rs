//! 分章服务 - 业务能力层
//!
//! 把全文切成有序的 章节序号 → 章节文本 映射。
//!
//! 策略顺序：
//! 1. **标题检测**：按 "Chapter 3" / "Capítulo IV" / 独立罗马数字行 等
//!    标题行切分，尊重作者本来的章节边界，章节数由检测结果决定；
//! 2. **长度兜底**：一个标题都没找到时，按目标章节数等长切分，
//!    保证非空文本 + N > 0 时一定有可用结果，分章永远不会彻底失败。

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

/// 有序的 章节序号（从 1 开始，连续）→ 章节文本 映射
pub type ChapterMap = BTreeMap<u32, String>;

/// 章节标题行：关键词 + 阿拉伯数字或罗马数字，大小写不敏感
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:chapter|cap[íi]tulo|chap\.?|cap\.?|ch\.?)[ \t]+(?:\d+|[ivxlcdm]+)\b.*$")
        .expect("章节标题正则应当合法")
});

/// 独立罗马数字行（如诗集/古典作品的章节标记）
///
/// 这一条只认大写：小写会把 "mild" 这类普通单词行误判成标题。
static ROMAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[IVXLCDM]{1,7}\.?[ \t]*$").expect("罗马数字正则应当合法"));

/// 把全文切分成章节
///
/// 优先标题检测；零命中时回退到按 `total_chapters` 等长切分。
pub fn segment_chapters(full_text: &str, total_chapters: u32) -> ChapterMap {
    let boundaries = detect_boundaries(full_text);

    if boundaries.is_empty() {
        debug!("未检测到章节标题，回退到等长切分 (N = {})", total_chapters);
        return split_by_length(full_text, total_chapters);
    }

    info!("✓ 检测到 {} 个章节标题", boundaries.len());

    let mut chapters = ChapterMap::new();
    for (index, start) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(index + 1)
            .copied()
            .unwrap_or(full_text.len());
        let chapter_text = full_text[*start..end].trim();
        chapters.insert((index + 1) as u32, chapter_text.to_string());
    }
    chapters
}

/// 检测所有章节边界（返回各标题行在全文中的起始字节偏移，升序去重）
fn detect_boundaries(full_text: &str) -> Vec<usize> {
    let mut starts: Vec<usize> = HEADING_RE
        .find_iter(full_text)
        .map(|m| m.start())
        .chain(ROMAN_RE.find_iter(full_text).map(|m| m.start()))
        .collect();
    starts.sort_unstable();
    starts.dedup();
    starts
}

/// 等长切分兜底
///
/// 按字符数把全文切成 `total_chapters` 个连续不重叠的片段，
/// 整除余数全部并入最后一段；每段去除首尾空白。
/// N 为 0 或文本为空时返回空映射。
pub fn split_by_length(full_text: &str, total_chapters: u32) -> ChapterMap {
    let mut chapters = ChapterMap::new();
    if total_chapters == 0 || full_text.is_empty() {
        return chapters;
    }

    // 按字符切分，避免在多字节字符中间截断
    let chars: Vec<char> = full_text.chars().collect();
    let n = total_chapters as usize;
    let chunk_size = chars.len() / n;

    for i in 0..n {
        let start = (i * chunk_size).min(chars.len());
        let end = if i + 1 < n {
            ((i + 1) * chunk_size).min(chars.len())
        } else {
            chars.len()
        };
        let slice: String = chars[start..end].iter().collect();
        chapters.insert((i + 1) as u32, slice.trim().to_string());
    }
    chapters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_length_exact_coverage() {
        // 无标题文本：N 段连续不重叠，拼回去等于原文
        let text = "abcdefghij";
        let chapters = split_by_length(text, 3);

        assert_eq!(chapters.len(), 3);
        assert_eq!(
            chapters.keys().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let joined: String = chapters.values().cloned().collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_split_by_length_last_chunk_absorbs_remainder() {
        // 10 个字符切 3 段：3 + 3 + 4
        let chapters = split_by_length("abcdefghij", 3);
        assert_eq!(chapters[&1], "abc");
        assert_eq!(chapters[&2], "def");
        assert_eq!(chapters[&3], "ghij");
    }

    #[test]
    fn test_split_by_length_trims_each_slice() {
        let chapters = split_by_length("AAAA    BBBB", 2);
        assert_eq!(chapters[&1], "AAAA");
        assert_eq!(chapters[&2], "BBBB");
    }

    #[test]
    fn test_split_by_length_empty_inputs() {
        assert!(split_by_length("", 3).is_empty());
        assert!(split_by_length("some text", 0).is_empty());
    }

    #[test]
    fn test_split_by_length_multibyte_text() {
        // 多字节字符不会在中间截断
        let chapters = split_by_length("第一章内容第二章内容", 2);
        assert_eq!(chapters[&1], "第一章内容");
        assert_eq!(chapters[&2], "第二章内容");
    }

    #[test]
    fn test_segment_chapters_by_heading() {
        let text = "Chapter 1\nIt was a dark night.\n\nChapter 2\nThe sun rose.\n";
        let chapters = segment_chapters(text, 5);

        // 章节数由检测结果决定，与目标 N 无关
        assert_eq!(chapters.len(), 2);
        assert!(chapters[&1].starts_with("Chapter 1"));
        assert!(chapters[&1].contains("dark night"));
        assert!(chapters[&2].starts_with("Chapter 2"));
        assert!(chapters[&2].contains("sun rose"));
    }

    #[test]
    fn test_segment_chapters_heading_spellings() {
        let text = "CAPÍTULO 1\nuno\nchap. 2\ndos\nCh. III\ntres\n";
        let chapters = segment_chapters(text, 1);
        assert_eq!(chapters.len(), 3);
    }

    #[test]
    fn test_segment_chapters_standalone_roman_heading() {
        let text = "I.\nFirst part text.\nII.\nSecond part text.\n";
        let chapters = segment_chapters(text, 9);
        assert_eq!(chapters.len(), 2);
        assert!(chapters[&2].contains("Second part"));
    }

    #[test]
    fn test_lowercase_word_line_is_not_roman_heading() {
        // "mild" 全由罗马数字字母组成，但小写行不应被当成标题
        let text = "mild\nweather all week\nmild\nagain";
        let chapters = segment_chapters(text, 2);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[&1], "mild\nweather all");
        assert_eq!(chapters[&2], "week\nmild\nagain");
    }

    #[test]
    fn test_segment_chapters_falls_back_without_headings() {
        let text = "AAAABBBB";
        let chapters = segment_chapters(text, 2);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[&1], "AAAA");
        assert_eq!(chapters[&2], "BBBB");
    }

    #[test]
    fn test_segment_chapters_empty_text() {
        assert!(segment_chapters("", 4).is_empty());
    }
}
