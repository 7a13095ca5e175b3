//! 会话级批处理状态
//!
//! 每次状态变更都消费旧值并返回新值，便于在没有界面的情况下做单元测试。
//! 只有编排器持有并修改它，对外只发布快照。

use crate::models::processing_result::ProcessingResult;
use crate::models::uploaded_file::UploadedFile;

/// 批处理状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchState {
    files: Vec<UploadedFile>,
    results: Vec<ProcessingResult>,
    is_processing: bool,
    error: Option<String>,
}

impl BatchState {
    /// 当前所有文件（按提交顺序）
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// 所有批次累计的结果
    pub fn results(&self) -> &[ProcessingResult] {
        &self.results
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// 批次级别的错误提示
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 按文件名查找结果（同名时返回第一个）
    pub fn result_for(&self, file_name: &str) -> Option<&ProcessingResult> {
        self.results.iter().find(|r| r.file_name == file_name)
    }

    // ========== 状态变更 ==========

    /// 追加一批文件
    pub fn add_files(mut self, files: impl IntoIterator<Item = UploadedFile>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn start_processing(mut self) -> Self {
        self.is_processing = true;
        self
    }

    pub fn finish_processing(mut self) -> Self {
        self.is_processing = false;
        self
    }

    /// 合并一批已完成的结果，保留之前批次的结果
    pub fn settle_batch(mut self, results: impl IntoIterator<Item = ProcessingResult>) -> Self {
        self.results.extend(results);
        self
    }

    /// 按名称删除文件及其结果；名称不存在时不做任何改变
    pub fn remove_file(mut self, file_name: &str) -> Self {
        self.files.retain(|f| f.name != file_name);
        self.results.retain(|r| r.file_name != file_name);
        self
    }

    pub fn set_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// 关闭错误提示
    pub fn clear_error(mut self) -> Self {
        self.error = None;
        self
    }
}
