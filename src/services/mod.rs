//! 业务能力层（Services）
//!
//! 每个服务只描述"我能做什么"：
//! - `prompt_composer` - 科目 + 组数 → 提示词列表
//! - `text_generator` / `llm_service` - 提示词 → 文本
//! - `pdf_layout` / `document_assembler` - 文本块 → PDF

pub mod document_assembler;
pub mod llm_service;
pub mod pdf_layout;
pub mod prompt_composer;
pub mod text_generator;

pub use document_assembler::{AssembledPdf, DocumentAssembler};
pub use llm_service::LlmService;
pub use pdf_layout::PageSetup;
pub use prompt_composer::{check_count, PromptComposer};
pub use text_generator::TextGenerator;
