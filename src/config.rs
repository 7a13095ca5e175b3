use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 单个文件允许的最大字节数（5 MiB）
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 识别服务地址（接收 multipart 图片，返回 detected_numbers）
    pub recognition_endpoint: String,
    /// 单个文件大小上限（字节）
    pub max_file_size_bytes: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recognition_endpoint: "http://localhost:8000/process-image".to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载，缺失或无法解析的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 TOML 配置文件，再用环境变量覆盖
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_toml_str(&content)?.with_env_overrides())
    }

    /// 解析 TOML 文本，未出现的字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            recognition_endpoint: std::env::var("RECOGNITION_ENDPOINT").unwrap_or(self.recognition_endpoint),
            max_file_size_bytes: std::env::var("MAX_FILE_SIZE_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_file_size_bytes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_five_mib() {
        let config = Config::default();
        assert_eq!(config.max_file_size_bytes, 5_242_880);
        assert!(config.recognition_endpoint.ends_with("/process-image"));
    }

    #[test]
    fn test_toml_partial_override() {
        let config = Config::from_toml_str(r#"recognition_endpoint = "http://ocr.local/scan""#).unwrap();
        assert_eq!(config.recognition_endpoint, "http://ocr.local/scan");
        assert_eq!(config.max_file_size_bytes, DEFAULT_MAX_FILE_SIZE_BYTES);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_toml_invalid_type() {
        let result = Config::from_toml_str("max_file_size_bytes = \"big\"");
        assert!(matches!(result, Err(ConfigError::TomlParseFailed(_))));
    }
}
