/// 日志工具模块
///
/// 提供日志初始化和批处理生命周期的输出辅助函数
use crate::config::Config;
use crate::models::{ProcessingResult, ResultStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认级别 info，详细模式为 debug；设置了 RUST_LOG 时以其为准。重复调用不会报错
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 电表读数识别");
    info!("🌐 识别服务: {}", config.recognition_endpoint);
    info!("📏 单个文件上限: {} 字节", config.max_file_size_bytes);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `file_count`: 本批文件数量
pub fn log_batch_start(batch_num: usize, file_count: usize) {
    info!("{}", "=".repeat(60));
    info!("📦 开始处理第 {} 批，共 {} 个文件", batch_num, file_count);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, results: &[ProcessingResult]) {
    let count = |status: ResultStatus| results.iter().filter(|r| r.status == status).count();

    info!("{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {} / 无读数 {} / 失败 {}",
        batch_num,
        count(ResultStatus::Success),
        count(ResultStatus::Warning),
        count(ResultStatus::Error)
    );
    info!("完成时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
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
        assert_eq!(truncate_text("00123", 10), "00123");
        assert_eq!(truncate_text("电表读数识别结果", 4), "电表读数...");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
