//! # Meter Reading OCR
//!
//! 电表读数识别客户端：提交电表照片，由远程识别服务返回读数
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `UploadedFile`、`ProcessingResult`、`BatchState`
//! - `models/loaders` - 从磁盘加载文件
//!
//! ### ② 客户端层（Clients）
//! - `RecognitionClient` - 识别服务能力
//! - `HttpRecognitionClient` - multipart 上传实现
//!
//! ### ③ 业务能力层（Services）
//! - `FileValidator` - 类型 / 大小校验
//! - `Dispatcher` - 并发分发识别请求，按输入顺序汇总
//!
//! ### ④ 编排层（Orchestration）
//! - `UploadOrchestrator` - 持有会话状态，校验 → 分发 → 汇总
//! - `App` - 命令行与交互式会话

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{HttpRecognitionClient, RecognitionClient};
pub use config::Config;
pub use error::{BatchError, ConfigError, RequestError, ValidationError};
pub use models::{BatchState, ProcessingResult, ResultStatus, UploadedFile};
pub use orchestrator::{App, BatchOutcome, UploadOrchestrator};
pub use services::{Dispatcher, FileValidator};
