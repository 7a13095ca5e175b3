use std::fmt;
use std::sync::Arc;

/// 用户提交的单个文件
///
/// `name` 同时用作展示和删除的键；同一批次内按名称区分，而不是按内容。
/// 内容用 `Arc` 共享，状态快照克隆时不复制图片数据
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub content: Arc<[u8]>,
}

impl UploadedFile {
    /// 创建文件，大小取自内容长度
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// 使用文件来源声明的大小创建
    ///
    /// 超过上限的文件不读取内容，`content` 为空，`size` 仍是真实大小
    pub fn with_declared_size(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// 是否为图片类型
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// 以 KB 显示的文件大小（保留两位小数）
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

// 内容可能有几 MB，调试输出只显示长度
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_from_content() {
        let file = UploadedFile::new("a.png", "image/png", vec![0u8; 2048]);
        assert_eq!(file.size, 2048);
        assert_eq!(file.size_kb(), "2.00 KB");
        assert!(file.is_image());
    }

    #[test]
    fn test_declared_size_kept() {
        let file = UploadedFile::with_declared_size("huge.png", "image/png", 64 * 1024 * 1024, Vec::new());
        assert_eq!(file.size, 64 * 1024 * 1024);
        assert!(file.content.is_empty());
    }

    #[test]
    fn test_debug_hides_content() {
        let file = UploadedFile::new("b.txt", "text/plain", b"hello".to_vec());
        let debug = format!("{:?}", file);
        assert!(debug.contains("<5 bytes>"));
        assert!(!file.is_image());
    }
}
