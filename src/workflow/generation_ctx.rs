//! 生成上下文
//!
//! 封装"我正在生成哪个科目的第几组"这一信息

use std::fmt::Display;

use crate::models::Topic;

/// 单次生成调用的上下文，仅用于日志和错误定位
#[derive(Debug, Clone, Copy)]
pub struct GenerationCtx {
    pub topic: Topic,
    /// 第几组（从 1 开始）
    pub repetition: usize,
    /// 本周期总组数
    pub count: usize,
}

impl GenerationCtx {
    pub fn new(topic: Topic, repetition: usize, count: usize) -> Self {
        Self {
            topic,
            repetition,
            count,
        }
    }
}

impl Display for GenerationCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} 第 {}/{} 组]", self.topic, self.repetition, self.count)
    }
}
