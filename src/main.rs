use std::sync::Arc;

use anyhow::{Context, Result};
use book_question_worker::orchestrator;
use book_question_worker::utils::logging;
use book_question_worker::{BookProcessingInput, BookProcessor, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 解析输入：book_id、文档 URL、目标章节数
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        anyhow::bail!("用法: {} <book_id> <document_url> <total_chapters>", args[0]);
    }
    let input = BookProcessingInput {
        book_id: args[1].parse().context("book_id 必须是整数")?,
        document_url: args[2].clone(),
        total_chapters: args[3].parse().context("total_chapters 必须是非负整数")?,
    };

    logging::log_startup(input.book_id, input.total_chapters);

    // 以后台任务方式启动处理；运行结果只写入日志
    let processor = Arc::new(BookProcessor::from_config(&config)?);
    let handle = orchestrator::spawn(processor, input);

    // 本进程是单次 worker，等待后台任务结束后退出
    let result = handle.await.context("后台任务执行失败")?;
    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}
