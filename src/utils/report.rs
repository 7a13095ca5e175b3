//! 结果展示
//!
//! 状态到展示样式的映射表，以及文件列表、结果列表的文本渲染

use crate::models::{ProcessingResult, ResultStatus, UploadedFile};
use std::fmt::Write;

/// 单个状态的展示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub marker: &'static str,
    pub label: &'static str,
}

/// 状态 → 展示样式
pub fn presentation(status: ResultStatus) -> StatusPresentation {
    match status {
        ResultStatus::Success => StatusPresentation {
            marker: "✅",
            label: "success",
        },
        ResultStatus::Warning => StatusPresentation {
            marker: "⚠️",
            label: "warning",
        },
        ResultStatus::Error => StatusPresentation {
            marker: "❌",
            label: "error",
        },
    }
}

/// 渲染已上传文件列表
pub fn render_files(files: &[UploadedFile]) -> String {
    if files.is_empty() {
        return "No files uploaded\n".to_string();
    }

    let mut out = String::from("Uploaded Files\n");
    for file in files {
        let _ = writeln!(out, "  {}  ({})", file.name, file.size_kb());
    }
    out
}

/// 渲染处理结果列表
pub fn render_results(results: &[ProcessingResult]) -> String {
    if results.is_empty() {
        return "No results yet\n".to_string();
    }

    let mut out = String::from("Processed Results\n");
    for result in results {
        let style = presentation(result.status);
        let _ = writeln!(
            out,
            "  {} [{}] {}: {}",
            style.marker, style.label, result.file_name, result.extracted_text
        );
    }
    out
}

/// 渲染批次级别错误提示
pub fn render_error_banner(error: Option<&str>) -> Option<String> {
    error.map(|message| format!("❗ {} (type `dismiss` to clear)\n", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_distinct_markers() {
        let markers = [
            presentation(ResultStatus::Success).marker,
            presentation(ResultStatus::Warning).marker,
            presentation(ResultStatus::Error).marker,
        ];
        assert_ne!(markers[0], markers[1]);
        assert_ne!(markers[1], markers[2]);
        assert_ne!(markers[0], markers[2]);
    }

    #[test]
    fn test_render_files_shows_kb() {
        let files = vec![UploadedFile::new("meter1.jpg", "image/jpeg", vec![0; 1536])];
        let text = render_files(&files);
        assert!(text.contains("meter1.jpg  (1.50 KB)"));
    }

    #[test]
    fn test_render_results() {
        let results = vec![
            ProcessingResult::from_readings("meter1.jpg", &["00123".to_string()]),
            ProcessingResult::failed("meter2.jpg", "bad image"),
        ];
        let text = render_results(&results);
        assert!(text.contains("✅ [success] meter1.jpg: 00123"));
        assert!(text.contains("❌ [error] meter2.jpg: Failed to process: bad image"));
    }

    #[test]
    fn test_banner_only_when_error() {
        assert!(render_error_banner(None).is_none());
        assert!(render_error_banner(Some("Please upload only image files"))
            .unwrap()
            .contains("Please upload only image files"));
    }
}
