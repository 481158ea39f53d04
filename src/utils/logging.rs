//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 通过 RUST_LOG 环境变量控制级别，默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `book_id`: 书籍 ID
/// - `total_chapters`: 目标章节数
pub fn log_startup(book_id: i64, total_chapters: u32) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 书籍题目生成模式");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📖 书籍 ID: {}", book_id);
    info!("📊 目标章节数: {}", total_chapters);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        // 按字符截断，不会切坏多字节字符
        assert_eq!(truncate_text("第一章的内容", 3), "第一章...");
    }
}
