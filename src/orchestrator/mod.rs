//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `upload_orchestrator` - 上传编排器
//! - 持有会话级 `BatchState`
//! - 校验 → 分发 → 汇总
//! - 保证处理中标志在任何退出路径上都被清除
//!
//! ### `app` - 命令行应用
//! - 管理应用生命周期（初始化、运行）
//! - 从磁盘加载文件，输出结果
//! - 交互式会话（`session` 负责命令解析）
//!
//! ## 层次关系
//!
//! ```text
//! app (命令行 / 会话)
//!     ↓
//! upload_orchestrator (Vec<UploadedFile> → BatchState)
//!     ↓
//! services (validator / dispatcher)
//!     ↓
//! clients (RecognitionClient)
//! ```

pub mod app;
pub mod session;
pub mod upload_orchestrator;

pub use app::App;
pub use session::SessionCommand;
pub use upload_orchestrator::{BatchOutcome, UploadOrchestrator};
