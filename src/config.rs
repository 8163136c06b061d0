use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 每次最多生成的组数（界面上的上限）
pub const MAX_SETS_PER_CYCLE: usize = 5;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单次生成调用的超时时间（秒）
    pub generation_timeout_secs: u64,
    /// 建立连接的超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 同一周期内并行调用的数量，1 表示逐个调用
    pub max_parallel_generations: usize,
    /// 同时进行的生成周期上限
    pub max_concurrent_cycles: usize,
    // --- PDF 配置 ---
    pub font_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8501".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 8192,
            generation_timeout_secs: 120,
            connect_timeout_secs: 10,
            max_parallel_generations: 1,
            max_concurrent_cycles: 4,
            font_path: "assets/DejaVuSans.ttf".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）→ 环境变量覆盖 → 校验
    ///
    /// 配置文件路径取自 `CONFIG_FILE`，默认 `config.toml`，不存在时跳过
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 只使用默认值和环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let api_key = std::env::var("LLM_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .unwrap_or(self.llm_api_key);

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(self.bind_addr),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            llm_api_key: api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: env_parse("LLM_TEMPERATURE", "f32")?.unwrap_or(self.llm_temperature),
            llm_max_tokens: env_parse("LLM_MAX_TOKENS", "u32")?.unwrap_or(self.llm_max_tokens),
            generation_timeout_secs: env_parse("GENERATION_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.generation_timeout_secs),
            connect_timeout_secs: env_parse("CONNECT_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.connect_timeout_secs),
            max_parallel_generations: env_parse("MAX_PARALLEL_GENERATIONS", "usize")?
                .unwrap_or(self.max_parallel_generations),
            max_concurrent_cycles: env_parse("MAX_CONCURRENT_CYCLES", "usize")?
                .unwrap_or(self.max_concurrent_cycles),
            font_path: std::env::var("FONT_PATH").unwrap_or(self.font_path),
        })
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.generation_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "generation_timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.max_parallel_generations == 0 || self.max_parallel_generations > MAX_SETS_PER_CYCLE {
            return Err(ConfigError::Invalid {
                field: "max_parallel_generations",
                reason: format!("must be between 1 and {}", MAX_SETS_PER_CYCLE),
            });
        }
        if self.max_concurrent_cycles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_concurrent_cycles",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(ConfigError::Invalid {
                field: "llm_temperature",
                reason: "must be between 0 and 2".to_string(),
            });
        }
        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// 读取并解析环境变量，未设置时返回 None
fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_needs_api_key() {
        assert!(matches!(
            Config::default().validate(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = Config::from_toml_str(
            r#"
            llm_model_name = "gemini-2.5-flash"
            max_parallel_generations = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.llm_model_name, "gemini-2.5-flash");
        assert_eq!(config.max_parallel_generations, 3);
        assert_eq!(config.bind_addr, Config::default().bind_addr);
    }

    #[test]
    fn test_rejects_zero_timeout_and_parallelism() {
        let mut config = valid();
        config.generation_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "generation_timeout_secs", .. })
        ));

        let mut config = valid();
        config.connect_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "connect_timeout_secs", .. })
        ));

        let mut config = valid();
        config.max_parallel_generations = MAX_SETS_PER_CYCLE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        assert!(Config::from_toml_str("max_concurrent_cycles = \"many\"").is_err());
    }
}
