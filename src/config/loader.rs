//! 配置加载器实现
//!
//! 提供 JSON/TOML 配置文件解析、默认值合并、环境变量替换和错误处理功能

use crate::config::types::{validate_config, CliConfig};
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON 格式（默认）
    Json,
    /// TOML 格式
    Toml,
}

impl ConfigFormat {
    /// 根据扩展名判断配置格式，`.toml` 以外均按 JSON 处理
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// 配置加载器trait，定义配置加载接口
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    /// 从文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回
    /// * `Result<CliConfig>` - 加载的配置或错误
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<CliConfig>;

    /// 从字符串加载配置
    ///
    /// # 参数
    /// * `content` - 配置文件内容
    /// * `format` - 配置格式
    ///
    /// # 返回
    /// * `Result<CliConfig>` - 加载的配置或错误
    async fn load_from_string(&self, content: &str, format: ConfigFormat) -> Result<CliConfig>;

    /// 验证配置
    fn validate(&self, config: &CliConfig) -> Result<()>;
}

/// 基于文件的配置加载器
#[derive(Debug, Clone)]
pub struct FileConfigLoader {
    /// 是否启用环境变量替换
    enable_env_substitution: bool,
}

impl FileConfigLoader {
    /// 创建新的配置加载器
    ///
    /// # 参数
    /// * `enable_env_substitution` - 是否启用环境变量替换
    pub fn new(enable_env_substitution: bool) -> Self {
        Self {
            enable_env_substitution,
        }
    }

    /// 替换字符串中的环境变量
    ///
    /// # 参数
    /// * `content` - 要处理的字符串
    ///
    /// # 返回
    /// * `Result<String>` - 替换后的字符串或错误
    fn substitute_env_vars(&self, content: &str) -> Result<String> {
        if !self.enable_env_substitution {
            return Ok(content.to_string());
        }

        // 匹配 ${VAR_NAME} 格式的环境变量
        let env_var_regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::ParseError(format!("正则表达式错误: {}", e)))?;

        let mut result = content.to_string();

        for captures in env_var_regex.captures_iter(content) {
            let full_match = &captures[0];
            let var_name = &captures[1];

            match std::env::var(var_name) {
                Ok(value) => {
                    result = result.replace(full_match, &value);
                }
                Err(_) => {
                    return Err(ConfigError::EnvVarError {
                        var: var_name.to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(result)
    }

    /// 解析配置内容，缺失字段取默认值
    fn parse(&self, content: &str, format: ConfigFormat) -> Result<CliConfig> {
        let processed_content = self.substitute_env_vars(content)?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&processed_content)
                .map_err(|e| ConfigError::ParseError(format!("JSON解析失败: {}", e)))?,
            ConfigFormat::Toml => toml::from_str(&processed_content)
                .map_err(|e| ConfigError::ParseError(format!("TOML解析失败: {}", e)))?,
        };

        Ok(config)
    }

    /// 加载配置，默认路径的文件不存在时使用默认配置
    ///
    /// # 参数
    /// * `explicit_path` - 通过 `-c` 指定的路径，指定时文件必须存在
    pub async fn load_or_default(&self, explicit_path: Option<&Path>) -> Result<CliConfig> {
        match explicit_path {
            Some(path) => self.load_from_file(path).await,
            None => {
                let path = get_default_config_path();
                if path.exists() {
                    self.load_from_file(&path).await
                } else {
                    log::debug!("默认配置文件不存在，使用默认配置: {}", path.display());
                    Ok(CliConfig::default())
                }
            }
        }
    }
}

impl Default for FileConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ConfigLoader for FileConfigLoader {
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<CliConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ParseError(format!("读取文件失败: {}", e)))?;

        let config = self.parse(&content, ConfigFormat::from_path(path))?;
        self.validate(&config)?;

        log::info!("成功加载配置文件: {}", path.display());
        log::debug!("配置内容: {:?}", config);

        Ok(config)
    }

    async fn load_from_string(&self, content: &str, format: ConfigFormat) -> Result<CliConfig> {
        let config = self.parse(content, format)?;
        self.validate(&config)?;

        log::debug!("成功解析配置字符串");

        Ok(config)
    }

    fn validate(&self, config: &CliConfig) -> Result<()> {
        validate_config(config).map_err(|e| ConfigError::ValidationError(e).into())
    }
}

/// 获取默认配置文件路径：`~/.blockstack-cli.conf`
pub fn get_default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".blockstack-cli.conf"))
        .unwrap_or_else(|| PathBuf::from(".blockstack-cli.conf"))
}
