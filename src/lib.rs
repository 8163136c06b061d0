//! # CLAT Study Material
//!
//! 一个用于生成 CLAT/AILET 练习材料的 Rust 服务
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models / Prompts）
//! - `models/` - 科目、模板、生成请求与结果、Document
//! - `prompts/` - 五个科目的固定出题模板
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `PromptComposer` - 科目 + 组数 → 提示词列表
//! - `LlmService` - 提示词 → 文本（实现 `TextGenerator`）
//! - `DocumentAssembler` - 文本块 → PDF
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次生成"的完整流程
//! - `GenerationCtx` - 上下文封装（科目 + 第几组）
//! - `GenerationCycle` - 流程编排（compose → generate → label → assemble）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，管理资源和 HTTP 服务
//! - `orchestrator/routes` - 路由与并发控制
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, MAX_SETS_PER_CYCLE};
pub use error::{AppError, AppResult, CycleStep};
pub use models::{Document, Topic};
pub use orchestrator::{router, App, AppState};
pub use services::{DocumentAssembler, LlmService, PromptComposer, TextGenerator};
pub use workflow::{GenerationCtx, GenerationCycle};
