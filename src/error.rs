use thiserror::Error;

/// 文件校验错误
///
/// 显示文本直接作为批次级别的提示信息展示给用户
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// MIME 类型不是 image/*
    #[error("Please upload only image files")]
    UnsupportedType { file_name: String, mime_type: String },
    /// 文件超过大小上限
    #[error("File size should not exceed {}", format_limit(.limit))]
    FileTooLarge { file_name: String, size: u64, limit: u64 },
}

impl ValidationError {
    /// 触发错误的文件名
    pub fn file_name(&self) -> &str {
        match self {
            ValidationError::UnsupportedType { file_name, .. }
            | ValidationError::FileTooLarge { file_name, .. } => file_name,
        }
    }
}

/// 大小上限的显示文本：整 MB 显示为 `5MB`，否则退到 KB 或字节
fn format_limit(limit: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    match *limit {
        l if l >= MB && l % MB == 0 => format!("{}MB", l / MB),
        l if l >= MB => format!("{:.2}MB", l as f64 / MB as f64),
        l if l >= KB && l % KB == 0 => format!("{}KB", l / KB),
        l if l >= KB => format!("{:.2}KB", l as f64 / KB as f64),
        l => format!("{} bytes", l),
    }
}

/// 单个文件的识别请求错误
///
/// 只在单个文件范围内处理，最终转换为 status = error 的结果
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// 网络层失败（连接、超时等）
    #[error("{0}")]
    Transport(String),
    /// 服务端返回非成功状态码
    #[error("识别服务返回状态码 {status}: {detail:?}")]
    BadStatus { status: u16, detail: Option<String> },
    /// 响应体无法解析
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RequestError {
    /// 生成面向用户的失败原因
    ///
    /// 非成功状态码且没有 detail 时，退回到通用提示
    pub fn reason(&self, file_name: &str) -> String {
        match self {
            RequestError::BadStatus {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            RequestError::BadStatus { .. } => format!("Error processing {}", file_name),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::InvalidResponse(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

/// 批次级别错误（单文件处理之外的失败）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// 等待全部请求完成时失败（任务 panic 或被取消）
    #[error("Batch processing failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for BatchError {
    fn from(err: tokio::task::JoinError) -> Self {
        BatchError::Join(err.to_string())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
    /// 识别服务地址无效
    #[error("识别服务地址无效 '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    /// HTTP 客户端创建失败
    #[error("HTTP 客户端创建失败: {0}")]
    ClientBuildFailed(String),
}
