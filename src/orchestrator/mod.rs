//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责资源管理和请求调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行、退出）
//! - 持有 LLM 客户端和生成周期
//!
//! ### `routes` - HTTP 路由
//! - 解析请求，控制并发（Semaphore）
//! - 把 Document 作为文件返回给浏览器
//!
//! ### `api_error` / `page`
//! - 错误到 HTTP 响应的映射
//! - 单页界面
//!
//! ## 层次关系
//!
//! ```text
//! app (服务生命周期)
//!     ↓
//! routes (单个 HTTP 请求)
//!     ↓
//! workflow::GenerationCycle (一次生成周期)
//!     ↓
//! services (能力层：compose / generate / assemble)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 LLM 客户端
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **无业务逻辑**：只做调度和错误映射

pub mod api_error;
pub mod app;
pub mod page;
pub mod routes;

// 重新导出主要类型
pub use api_error::ApiError;
pub use app::App;
pub use routes::{router, AppState};
