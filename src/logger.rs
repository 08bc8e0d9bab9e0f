//! 日志初始化与启动信息输出

use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info。
/// 重复调用不会报错，方便测试中多次初始化。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录服务启动信息
///
/// # 参数
/// - `config`: 服务配置
/// - `categories`: 分类数量
/// - `questions`: 题目数量
pub fn log_startup(config: &Config, categories: usize, questions: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 题库服务启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 种子文件: {}", config.seed_file);
    info!("📊 分类 {} 个, 题目 {} 道", categories, questions);
    info!("📄 每页 {} 道题", config.questions_per_page);
    info!("{}", "=".repeat(60));
}
