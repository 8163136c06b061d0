//! 文本生成能力
//!
//! 生成流程只依赖这个 trait，测试里可以换成固定输出的实现

use futures::future::BoxFuture;

use crate::error::GenerationError;

/// 文本生成服务
///
/// 一次调用对应一次独立的请求，不保留会话状态
pub trait TextGenerator: Send + Sync {
    /// 发送提示词，返回生成的文本
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>>;

    /// 用于日志的模型名称
    fn model_name(&self) -> &str;
}
