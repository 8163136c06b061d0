use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// 考试科目枚举（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// 批判性推理
    #[serde(rename = "Critical Reasoning")]
    CriticalReasoning,
    /// 常识（时事 / 静态常识）
    #[serde(rename = "General Knowledge")]
    GeneralKnowledge,
    /// 法律推理
    #[serde(rename = "Legal Reasoning")]
    LegalReasoning,
    /// 数学（数量技巧）
    #[serde(rename = "Mathematics")]
    Mathematics,
    /// 阅读理解
    #[serde(rename = "Reading Comprehension")]
    ReadingComprehension,
}

/// 名称 → 科目 查找表，键统一为小写
static TOPIC_LOOKUP: phf::Map<&'static str, Topic> = phf_map! {
    "critical reasoning" => Topic::CriticalReasoning,
    "cr" => Topic::CriticalReasoning,
    "general knowledge" => Topic::GeneralKnowledge,
    "gk" => Topic::GeneralKnowledge,
    "legal reasoning" => Topic::LegalReasoning,
    "legal" => Topic::LegalReasoning,
    "mathematics" => Topic::Mathematics,
    "maths" => Topic::Mathematics,
    "math" => Topic::Mathematics,
    "reading comprehension" => Topic::ReadingComprehension,
    "rc" => Topic::ReadingComprehension,
};

impl Topic {
    /// 全部科目，顺序即下拉框顺序
    pub const ALL: [Topic; 5] = [
        Topic::CriticalReasoning,
        Topic::GeneralKnowledge,
        Topic::LegalReasoning,
        Topic::Mathematics,
        Topic::ReadingComprehension,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Topic::CriticalReasoning => "Critical Reasoning",
            Topic::GeneralKnowledge => "General Knowledge",
            Topic::LegalReasoning => "Legal Reasoning",
            Topic::Mathematics => "Mathematics",
            Topic::ReadingComprehension => "Reading Comprehension",
        }
    }

    /// 查找科目（忽略大小写和首尾空白，支持常用缩写）
    pub fn find(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        TOPIC_LOOKUP.get(key.as_str()).copied()
    }

    /// 练习卷 PDF 的下载文件名
    pub fn practice_file_name(self) -> String {
        format!("{}_clat_practice.pdf", self.name().to_lowercase())
    }

    /// 练习卷标题
    pub fn practice_title(self) -> String {
        format!("{} Practice Set", self.name())
    }
}

impl FromStr for Topic {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| ComposeError::InvalidTopic(s.to_string()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
