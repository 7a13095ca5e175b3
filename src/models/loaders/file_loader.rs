use crate::models::uploaded_file::UploadedFile;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;

/// 判断 MIME 类型时读取的文件头长度
const HEADER_LEN: u64 = 8192;

/// 从磁盘读取文件并转换为 UploadedFile
///
/// 大小取自文件元数据。超过 `max_content_bytes` 的文件只读文件头，
/// 内容留空，交给校验器按大小拒绝。
/// MIME 类型优先根据文件头判断，识别不了时再看扩展名
pub async fn load_uploaded_file(path: &Path, max_content_bytes: u64) -> Result<UploadedFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("无效的文件路径: {}", path.display()))?;

    let size = fs::metadata(path)
        .await
        .with_context(|| format!("无法读取文件信息: {}", path.display()))?
        .len();

    let mut file = File::open(path)
        .await
        .with_context(|| format!("无法打开文件: {}", path.display()))?;

    let mut content = Vec::new();
    (&mut file)
        .take(HEADER_LEN)
        .read_to_end(&mut content)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;

    let mime_type = detect_mime_type(&content, &name);

    if size > max_content_bytes {
        tracing::debug!("{} 共 {} 字节，超过上限，不读取内容", name, size);
        return Ok(UploadedFile::with_declared_size(name, mime_type, size, Vec::new()));
    }

    file.read_to_end(&mut content)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;
    tracing::debug!("已加载 {} ({}, {} 字节)", name, mime_type, content.len());

    Ok(UploadedFile::new(name, mime_type, content))
}

/// 按顺序加载多个文件，任何一个失败则整体失败
pub async fn load_uploaded_files<P: AsRef<Path>>(paths: &[P], max_content_bytes: u64) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_uploaded_file(path.as_ref(), max_content_bytes).await?);
    }
    Ok(files)
}

/// 根据文件头判断 MIME 类型，失败时按扩展名猜测
fn detect_mime_type(content: &[u8], file_name: &str) -> String {
    if let Some(kind) = infer::get(content) {
        return kind.mime_type().to_string();
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
    .to_string()
}
