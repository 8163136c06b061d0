//! 提示词组装服务 - 业务能力层
//!
//! 只负责"科目 + 组数 → 提示词列表"，不调用模型

use std::collections::HashMap;

use tracing::debug;

use crate::config::MAX_SETS_PER_CYCLE;
use crate::error::ComposeError;
use crate::models::{GenerationRequest, Topic};
use crate::prompts::template_for;

/// 提示词组装器
///
/// 构造时把五个模板各渲染一次，之后 `compose` 是纯函数
#[derive(Debug, Clone)]
pub struct PromptComposer {
    prompts: HashMap<Topic, String>,
}

impl PromptComposer {
    pub fn new() -> Self {
        let prompts = Topic::ALL
            .into_iter()
            .map(|topic| (topic, template_for(topic).render()))
            .collect();
        Self { prompts }
    }

    /// 按科目名称组装
    ///
    /// 科目不在集合中时返回 `InvalidTopic`
    pub fn compose(&self, topic: &str, count: usize) -> Result<Vec<GenerationRequest>, ComposeError> {
        let topic: Topic = topic.parse()?;
        self.compose_for(topic, count)
    }

    /// 同一份模板重复 `count` 次，每次都是独立请求
    pub fn compose_for(&self, topic: Topic, count: usize) -> Result<Vec<GenerationRequest>, ComposeError> {
        check_count(count)?;

        let prompt = self.prompt(topic);
        debug!("组装提示词: {} x {} (长度 {} 字符)", topic, count, prompt.len());

        Ok((1..=count)
            .map(|repetition| GenerationRequest {
                topic,
                repetition,
                prompt: prompt.to_string(),
            })
            .collect())
    }

    /// 科目对应的提示词文本
    pub fn prompt(&self, topic: Topic) -> &str {
        // new() 覆盖了 Topic::ALL
        self.prompts.get(&topic).map(String::as_str).unwrap_or_default()
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// 组数必须在 [1, MAX_SETS_PER_CYCLE]
pub fn check_count(count: usize) -> Result<(), ComposeError> {
    if (1..=MAX_SETS_PER_CYCLE).contains(&count) {
        Ok(())
    } else {
        Err(ComposeError::CountOutOfRange {
            count,
            max: MAX_SETS_PER_CYCLE,
        })
    }
}
