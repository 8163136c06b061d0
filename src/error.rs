use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::topic::Topic;

/// 应用程序错误类型
///
/// 一次生成周期里的任何失败都归入三个步骤之一，界面据此提示用户
#[derive(Debug, Error)]
pub enum AppError {
    /// 组装提示词失败
    #[error("composition failed: {0}")]
    Compose(#[from] ComposeError),

    /// 生成服务失败，整批作废
    #[error("generation failed for {topic} set {repetition} of {count}: {source}")]
    Generation {
        topic: Topic,
        repetition: usize,
        count: usize,
        #[source]
        source: GenerationError,
    },

    /// PDF 生成失败
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// 出错的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    Composition,
    Generation,
    Rendering,
}

impl CycleStep {
    pub fn as_str(self) -> &'static str {
        match self {
            CycleStep::Composition => "composition",
            CycleStep::Generation => "generation",
            CycleStep::Rendering => "rendering",
        }
    }
}

impl AppError {
    /// 获取出错的步骤
    pub fn step(&self) -> CycleStep {
        match self {
            AppError::Compose(_) => CycleStep::Composition,
            AppError::Generation { .. } => CycleStep::Generation,
            AppError::Render(_) => CycleStep::Rendering,
        }
    }

    /// 生成失败时返回失败的组号（从 1 开始）
    pub fn failed_repetition(&self) -> Option<usize> {
        match self {
            AppError::Generation { repetition, .. } => Some(*repetition),
            _ => None,
        }
    }

    /// 创建生成失败错误
    pub fn generation_failed(
        topic: Topic,
        repetition: usize,
        count: usize,
        source: GenerationError,
    ) -> Self {
        AppError::Generation {
            topic,
            repetition,
            count,
            source,
        }
    }
}

/// 提示词组装错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// 不在科目集合中
    #[error("unknown topic '{0}'")]
    InvalidTopic(String),

    /// 组数超出 [1, max]
    #[error("number of sets must be between 1 and {max}, got {count}")]
    CountOutOfRange { count: usize, max: usize },
}

/// 生成服务错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 调用失败（网络、鉴权、服务端错误）
    #[error("service call failed (model: {model}): {message}")]
    Service { model: String, message: String },

    /// 返回内容为空
    #[error("service returned no usable text (model: {model})")]
    EmptyResponse { model: String },

    /// 超时
    #[error("no answer within {0:?}")]
    Timeout(Duration),
}

/// PDF 生成错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 字体文件读取失败
    #[error("font file {path} could not be read: {source}")]
    FontUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 字体文件无法解析
    #[error("font could not be parsed: {0}")]
    FontParse(String),

    /// 字体中没有该字符的字形
    #[error("character {character:?} (U+{code:04X}) in {location} cannot be encoded with the document font")]
    UnsupportedCharacter {
        character: char,
        code: u32,
        location: String,
    },

    /// 页面设置不合理
    #[error("invalid page setup: {0}")]
    PageSetup(String),

    /// 序列化失败
    #[error("document serialization failed: {0}")]
    Serialize(String),

    /// 后台渲染任务异常退出
    #[error("render task aborted: {0}")]
    Task(String),
}

impl RenderError {
    /// 创建不支持字符错误，`block` 为 None 表示标题
    pub fn unsupported_character(character: char, block: Option<usize>) -> Self {
        let location = match block {
            Some(index) => format!("block {}", index + 1),
            None => "title".to_string(),
        };
        RenderError::UnsupportedCharacter {
            character,
            code: character as u32,
            location,
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("config file {path} could not be read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("config file {path} is not valid TOML: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 环境变量解析失败
    #[error("environment variable {var_name}='{value}' is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 缺少 API Key
    #[error("no generation-service credential: set LLM_API_KEY or GEMINI_API_KEY")]
    MissingApiKey,

    /// 取值不合法
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
