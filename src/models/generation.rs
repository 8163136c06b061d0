use serde::Serialize;

use crate::models::topic::Topic;

/// 单次生成请求
///
/// 同一科目的多次请求使用相同的提示词，彼此独立
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub topic: Topic,
    /// 第几组（从 1 开始）
    pub repetition: usize,
    pub prompt: String,
}

/// 单次生成结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub topic: Topic,
    pub repetition: usize,
    /// 模型返回的原始文本
    pub text: String,
}

impl GenerationResult {
    pub fn new(request: &GenerationRequest, text: impl Into<String>) -> Self {
        Self {
            topic: request.topic,
            repetition: request.repetition,
            text: text.into(),
        }
    }

    /// 带科目标签的文本块，写入 PDF 时使用
    pub fn labeled_block(&self) -> String {
        label_block(self.topic, &self.text)
    }
}

/// `"Topic: <科目>\n\n<去除首尾空白的文本>"`
pub fn label_block(topic: Topic, text: &str) -> String {
    format!("Topic: {}\n\n{}", topic, text.trim())
}
