//! 章节处理上下文
//!
//! 封装"我正在处理哪本书的第几章"这一信息

/// 章节处理上下文
#[derive(Debug, Clone)]
pub struct ChapterCtx {
    /// 书籍 ID（外部后端的主键）
    pub book_id: i64,

    /// 本地章节序号（分章产出的 1 开始的序号，仅用于请求与日志）
    pub chapter_number: u32,

    /// 本书的章节总数（仅用于日志显示）
    pub total_chapters: usize,
}

impl ChapterCtx {
    pub fn new(book_id: i64, chapter_number: u32, total_chapters: usize) -> Self {
        Self {
            book_id,
            chapter_number,
            total_chapters,
        }
    }
}
