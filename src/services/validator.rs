//! 文件校验服务
//!
//! 在发出任何网络请求之前检查类型和大小

use crate::config::Config;
use crate::error::ValidationError;
use crate::models::UploadedFile;
use tracing::warn;

/// 文件校验器
///
/// 规则按顺序执行，遇到第一个不满足的规则即返回：
/// 1. MIME 类型必须以 `image/` 开头
/// 2. 大小不能超过上限（等于上限可以通过）
#[derive(Debug, Clone, Copy)]
pub struct FileValidator {
    max_file_size_bytes: u64,
}

impl FileValidator {
    pub fn new(config: &Config) -> Self {
        Self::with_limit(config.max_file_size_bytes)
    }

    pub fn with_limit(max_file_size_bytes: u64) -> Self {
        Self { max_file_size_bytes }
    }

    /// 单个文件大小上限（字节）
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// 校验单个文件
    pub fn validate(&self, file: &UploadedFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::UnsupportedType {
                file_name: file.name.clone(),
                mime_type: file.mime_type.clone(),
            });
        }

        if file.size > self.max_file_size_bytes {
            return Err(ValidationError::FileTooLarge {
                file_name: file.name.clone(),
                size: file.size,
                limit: self.max_file_size_bytes,
            });
        }

        Ok(())
    }

    /// 校验整批文件，任何一个不通过则整批拒绝
    pub fn validate_batch(&self, files: &[UploadedFile]) -> Result<(), ValidationError> {
        for file in files {
            if let Err(e) = self.validate(file) {
                warn!("[文件 {}] ⚠️ 校验未通过: {:?}", file.name, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_FILE_SIZE_BYTES;

    fn validator() -> FileValidator {
        FileValidator::with_limit(DEFAULT_MAX_FILE_SIZE_BYTES)
    }

    #[test]
    fn test_accepts_image() {
        let file = UploadedFile::new("a.png", "image/png", vec![0; 2048]);
        assert!(validator().validate(&file).is_ok());
    }

    #[test]
    fn test_rejects_non_image() {
        let file = UploadedFile::new("b.txt", "text/plain", vec![0; 1024]);
        assert!(matches!(
            validator().validate(&file),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_size_boundary() {
        let exact = UploadedFile::new("exact.jpg", "image/jpeg", vec![0; 5 * 1024 * 1024]);
        assert!(validator().validate(&exact).is_ok());

        let over = UploadedFile::new("over.jpg", "image/jpeg", vec![0; 5 * 1024 * 1024 + 1]);
        assert!(matches!(
            validator().validate(&over),
            Err(ValidationError::FileTooLarge { size, .. }) if size == 5 * 1024 * 1024 + 1
        ));
    }

    #[test]
    fn test_type_checked_before_size() {
        let file = UploadedFile::new("huge.pdf", "application/pdf", vec![0; 16]);
        let err = FileValidator::with_limit(8).validate(&file).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn test_batch_reports_first_violation() {
        let files = vec![
            UploadedFile::new("a.png", "image/png", vec![0; 2048]),
            UploadedFile::new("b.txt", "text/plain", vec![0; 1024]),
            UploadedFile::new("c.gif", "image/gif", vec![0; 64]),
        ];
        let err = FileValidator::with_limit(4096).validate_batch(&files).unwrap_err();
        assert_eq!(err.file_name(), "b.txt");
        assert_eq!(err.to_string(), "Please upload only image files");

        // 上限更小时，a.png 先因为大小被拒绝
        let err = FileValidator::with_limit(32).validate_batch(&files).unwrap_err();
        assert_eq!(err.file_name(), "a.png");
        assert!(matches!(err, ValidationError::FileTooLarge { size: 2048, limit: 32, .. }));
    }
}
