//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 LLM 服务、PDF 组装器和生成周期
//! 2. **并发控制**：使用 Semaphore 限制同时进行的生成周期
//! 3. **资源管理**：唯一持有 LLM 客户端的模块
//! 4. **服务运行**：监听端口，Ctrl-C 时优雅退出

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::orchestrator::routes::{router, AppState};
use crate::services::LlmService;
use crate::workflow::GenerationCycle;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let llm = LlmService::new(&config).context("LLM 服务初始化失败")?;
        let cycle = GenerationCycle::from_config(&config, Arc::new(llm));

        // 字体缺失不阻止启动，生成时会以渲染错误返回
        match cycle.assembler().check_font() {
            Ok(()) => info!("🔤 字体可用: {}", cycle.assembler().font_path().display()),
            Err(e) => warn!("⚠️ 字体不可用，生成 PDF 将失败: {}", e),
        }

        let state = AppState::new(cycle, config.max_concurrent_cycles);
        Ok(Self { config, state })
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// 运行 HTTP 服务，直到收到 Ctrl-C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法监听 {}", self.config.bind_addr))?;
        info!("✅ 服务已启动: http://{}", self.config.bind_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl-C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，等待进行中的请求完成");
}
