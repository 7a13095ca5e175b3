//! 识别请求分发服务
//!
//! 每个文件一个独立任务，全部发出后统一等待，按输入顺序返回结果

use crate::clients::RecognitionClient;
use crate::error::BatchError;
use crate::models::{ProcessingResult, UploadedFile};
use crate::utils::logging::truncate_text;
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 识别请求分发器
///
/// - 不限流、不重试，一个文件失败不会取消其他文件
/// - `dispatch` 的 future 被丢弃时，未完成的请求任务全部中止
/// - 单个文件失败只影响它自己的结果
/// - 不修改批处理状态，只返回结果
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn RecognitionClient>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn RecognitionClient>) -> Self {
        Self { client }
    }

    /// 并发处理整批文件
    ///
    /// 任一任务无法正常结束（panic 或被取消）时返回 `BatchError`，此时不报告任何单文件结果
    pub async fn dispatch(&self, files: Vec<UploadedFile>) -> Result<Vec<ProcessingResult>, BatchError> {
        let handles: Vec<_> = files
            .into_iter()
            .map(|file| {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move { process_file(client.as_ref(), file).await })
            })
            .collect();

        let mut tasks = AbortOnDrop(handles);

        // 等待本批所有任务完成
        join_all(tasks.0.iter_mut())
            .await
            .into_iter()
            .map(|settled| settled.map_err(BatchError::from))
            .collect()
    }
}

/// 持有本批任务句柄，析构时中止仍在运行的任务
struct AbortOnDrop<T>(Vec<JoinHandle<T>>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        let pending = self.0.iter().filter(|h| !h.is_finished()).count();
        if pending > 0 {
            debug!("批次被放弃，中止 {} 个未完成的请求", pending);
        }
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// 处理单个文件，所有请求错误都在这里转换为结果
pub async fn process_file(client: &dyn RecognitionClient, file: UploadedFile) -> ProcessingResult {
    match client.recognize(&file).await {
        Ok(readings) => {
            let result = ProcessingResult::from_readings(&file.name, &readings);
            info!("[文件 {}] ✓ 识别完成: {}", file.name, truncate_text(&result.extracted_text, 80));
            result
        }
        Err(e) => {
            warn!("[文件 {}] ❌ 识别失败: {}", file.name, e);
            ProcessingResult::failed(&file.name, &e.reason(&file.name))
        }
    }
}
