//! 提示词模板
//!
//! 每个科目对应一份固定模板，进程启动时渲染一次，之后只读。

pub mod templates;

pub use templates::template_for;
