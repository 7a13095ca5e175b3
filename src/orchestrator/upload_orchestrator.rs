//! 上传编排器 - 编排层
//!
//! 校验 → 分发 → 汇总，单向流水线。
//!
//! `BatchState` 只由编排器通过 `&mut self` 修改，外部只能拿到快照
//! （`state()` 或 `subscribe()`），所以在多线程运行时下也不会出现并发修改。

use crate::clients::RecognitionClient;
use crate::config::Config;
use crate::error::{BatchError, ValidationError};
use crate::models::{BatchState, ProcessingResult, UploadedFile};
use crate::services::{Dispatcher, FileValidator};
use crate::utils::logging::{log_batch_complete, log_batch_start};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 空批次，什么都没做
    Empty,
    /// 所有文件都已有结果（按输入顺序）
    Settled(Vec<ProcessingResult>),
    /// 批处理本身失败，没有任何单文件结果
    Failed(BatchError),
}

/// 上传编排器
pub struct UploadOrchestrator {
    validator: FileValidator,
    dispatcher: Dispatcher,
    state: BatchState,
    state_tx: watch::Sender<BatchState>,
    batch_count: usize,
}

impl UploadOrchestrator {
    pub fn new(client: Arc<dyn RecognitionClient>, config: &Config) -> Self {
        let (state_tx, _) = watch::channel(BatchState::default());
        Self {
            validator: FileValidator::new(config),
            dispatcher: Dispatcher::new(client),
            state: BatchState::default(),
            state_tx,
            batch_count: 0,
        }
    }

    /// 当前状态
    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    /// 订阅状态变化，每次变更都会发布一份快照
    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.state_tx.subscribe()
    }

    /// 提交一批文件
    ///
    /// 校验不通过时整批拒绝并返回 `ValidationError`，不会发出任何请求。
    /// 单文件的请求失败会作为结果返回，不会中断其他文件。
    /// 无论以何种方式结束，处理中标志都会被清除。
    /// future 被丢弃时，已发出但未完成的请求任务会被中止，本批不产生结果。
    pub async fn submit(&mut self, files: Vec<UploadedFile>) -> Result<BatchOutcome, ValidationError> {
        if files.is_empty() {
            debug!("空批次，跳过");
            return Ok(BatchOutcome::Empty);
        }

        if let Err(e) = self.validator.validate_batch(&files) {
            error!("❌ 整批拒绝 ({} 个文件): {}", files.len(), e);
            self.apply(|s| s.set_error(e.to_string()));
            return Err(e);
        }

        self.batch_count += 1;
        let batch_num = self.batch_count;
        log_batch_start(batch_num, files.len());

        let dispatcher = self.dispatcher.clone();
        let mut guard = ProcessingGuard::start(self, files.clone());

        let outcome = match dispatcher.dispatch(files).await {
            Ok(results) => {
                log_batch_complete(batch_num, &results);
                guard.apply(|s| s.settle_batch(results.clone()));
                BatchOutcome::Settled(results)
            }
            Err(e) => {
                error!("❌ 第 {} 批处理失败: {}", batch_num, e);
                guard.apply(|s| s.set_error(e.to_string()));
                BatchOutcome::Failed(e)
            }
        };

        Ok(outcome)
    }

    /// 按名称删除文件及其结果
    pub fn remove_file(&mut self, file_name: &str) {
        info!("🗑️ 删除文件: {}", file_name);
        self.apply(|s| s.remove_file(file_name));
    }

    /// 关闭批次级别错误提示
    pub fn dismiss_error(&mut self) {
        self.apply(BatchState::clear_error);
    }

    fn apply(&mut self, transition: impl FnOnce(BatchState) -> BatchState) {
        let current = std::mem::take(&mut self.state);
        self.state = transition(current);
        self.state_tx.send_replace(self.state.clone());
    }
}

/// 处理中标志的守卫：创建时置位，析构时清除
struct ProcessingGuard<'a> {
    orchestrator: &'a mut UploadOrchestrator,
}

impl<'a> ProcessingGuard<'a> {
    fn start(orchestrator: &'a mut UploadOrchestrator, files: Vec<UploadedFile>) -> Self {
        orchestrator.apply(|s| s.clear_error().add_files(files).start_processing());
        Self { orchestrator }
    }

    fn apply(&mut self, transition: impl FnOnce(BatchState) -> BatchState) {
        self.orchestrator.apply(transition);
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.orchestrator.apply(BatchState::finish_processing);
    }
}
