use serde::{Deserialize, Serialize};

/// 未识别到任何数字时的提示文本
pub const NO_NUMBERS_DETECTED: &str = "No numbers detected";

/// 单个文件的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Warning,
    Error,
}

/// 单个文件的处理结果，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub file_name: String,
    pub status: ResultStatus,
    pub extracted_text: String,
}

impl ProcessingResult {
    /// 根据识别到的读数生成结果：空列表为 warning，否则为 success
    pub fn from_readings(file_name: impl Into<String>, readings: &[String]) -> Self {
        let (status, extracted_text) = if readings.is_empty() {
            (ResultStatus::Warning, NO_NUMBERS_DETECTED.to_string())
        } else {
            (ResultStatus::Success, readings.join(", "))
        };
        Self {
            file_name: file_name.into(),
            status,
            extracted_text,
        }
    }

    /// 生成失败结果
    pub fn failed(file_name: impl Into<String>, reason: &str) -> Self {
        Self {
            file_name: file_name.into(),
            status: ResultStatus::Error,
            extracted_text: format!("Failed to process: {}", reason),
        }
    }
}
