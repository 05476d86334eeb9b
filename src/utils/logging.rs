//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅器
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 日志写到 stderr，stdout 留给 JSON 结果。重复调用不会 panic。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n试卷导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(strict_types: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - CSV 试卷导入模式");
    if strict_types {
        info!("🔒 严格题型校验已开启");
    }
    info!("{}", "=".repeat(60));
}

/// 记录文件加载信息
pub fn log_files_loaded(total: usize) {
    info!("✓ 找到 {} 个待导入的 CSV 文件\n", total);
}

/// 记录单个文件的导入开始
pub fn log_file_start(file_index: usize, total: usize, file_name: &str, size_kb: f64) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [{}/{}] {} ({:.1} KB)", file_index, total, file_name, size_kb);
}

/// 输出校验错误列表
pub fn log_validation_errors(file_index: usize, errors: &[String]) {
    warn!("[文件 {}] ❌ 校验失败，共 {} 条错误:", file_index, errors.len());
    for error in errors {
        warn!("[文件 {}]   - {}", file_index, error);
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 通过校验的文件数
/// - `failed`: 未通过的文件数
/// - `total`: 总数
/// - `questions`: 通过校验的题目总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    questions: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部导入完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 通过: {}/{} (共 {} 道题)", success, total, questions);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
