/// 识别服务客户端
///
/// 封装与识别服务的交互：一张图片一次 POST，返回识别到的读数
use crate::config::Config;
use crate::error::{ConfigError, RequestError};
use crate::models::UploadedFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// 识别服务能力
///
/// 返回按顺序排列的读数文本，可能为空
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    async fn recognize(&self, file: &UploadedFile) -> Result<Vec<String>, RequestError>;
}

/// 基于 HTTP multipart 的识别服务客户端
#[derive(Debug, Clone)]
pub struct HttpRecognitionClient {
    client: Client,
    endpoint: Url,
}

impl HttpRecognitionClient {
    /// 根据配置创建客户端，地址无效时立即报错
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_endpoint(&config.recognition_endpoint)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("不支持的协议: {}", url.scheme()),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecognitionClient for HttpRecognitionClient {
    async fn recognize(&self, file: &UploadedFile) -> Result<Vec<String>, RequestError> {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        debug!("[文件 {}] 发送识别请求: {}", file.name, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("[文件 {}] 识别服务返回 {}: {}", file.name, status, body);
            return Err(RequestError::BadStatus {
                status: status.as_u16(),
                detail: parse_error_detail(&body),
            });
        }

        parse_detected_numbers(&body)
    }
}

/// 成功响应体
#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    detected_numbers: Vec<DetectedNumber>,
}

/// 读数可能是字符串，也可能是数字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetectedNumber {
    Text(String),
    Number(serde_json::Number),
}

impl DetectedNumber {
    fn into_text(self) -> String {
        match self {
            DetectedNumber::Text(text) => text,
            DetectedNumber::Number(number) => number.to_string(),
        }
    }
}

/// 失败响应体
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<Value>,
}

/// 解析成功响应中的 detected_numbers
pub(crate) fn parse_detected_numbers(body: &str) -> Result<Vec<String>, RequestError> {
    let response: RecognitionResponse =
        serde_json::from_str(body).map_err(|e| RequestError::InvalidResponse(e.to_string()))?;

    Ok(response
        .detected_numbers
        .into_iter()
        .map(DetectedNumber::into_text)
        .collect())
}

/// 从失败响应中提取 detail
///
/// detail 不是字符串时（例如参数校验错误列表）保留其 JSON 文本
pub(crate) fn parse_error_detail(body: &str) -> Option<String> {
    let response: ErrorResponse = serde_json::from_str(body).ok()?;
    match response.detail? {
        Value::String(detail) => Some(detail),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
