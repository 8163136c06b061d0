/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::Document;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info。
/// 重复调用不会报错（测试里会多次调用）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - CLAT/AILET 练习题生成服务");
    info!("🌐 监听地址: http://{}", config.bind_addr);
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("🔤 字体文件: {}", config.font_path);
    info!(
        "📊 单次调用超时: {}s | 周期内并行数: {} | 同时进行的周期: {}",
        config.generation_timeout_secs, config.max_parallel_generations, config.max_concurrent_cycles
    );
    info!("{}", "=".repeat(60));
}

/// 记录生成周期开始
pub fn log_cycle_start(topic: &str, count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始生成: {} x {}", topic, count);
    info!("{}", "─".repeat(60));
}

/// 记录生成周期完成
pub fn log_cycle_complete(document: &Document, elapsed: Duration) {
    info!("\n{}", "─".repeat(60));
    info!("✅ 生成完成: {}", document.title);
    info!(
        "📄 {} 组内容 / {} 页 / {} 字节",
        document.blocks.len(),
        document.page_count,
        document.len()
    );
    info!(
        "完成时间: {} (耗时 {:.1}s)",
        document.generated_at.format("%Y-%m-%d %H:%M:%S"),
        elapsed.as_secs_f64()
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("₹₹₹₹₹", 3), "₹₹₹...");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
