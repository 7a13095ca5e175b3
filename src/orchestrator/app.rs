//! 命令行应用 - 编排层入口
//!
//! 负责应用初始化、从磁盘加载文件、输出结果以及交互式会话

use crate::clients::{HttpRecognitionClient, RecognitionClient};
use crate::config::Config;
use crate::models::load_uploaded_files;
use crate::orchestrator::session::{SessionCommand, HELP_TEXT};
use crate::orchestrator::upload_orchestrator::{BatchOutcome, UploadOrchestrator};
use crate::utils::logging::log_startup;
use crate::utils::report::{render_error_banner, render_files, render_results};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    orchestrator: UploadOrchestrator,
    json_output: bool,
}

impl App {
    /// 初始化应用，识别服务地址无效时直接失败
    pub fn initialize(config: Config, json_output: bool) -> Result<Self> {
        log_startup(&config);

        let client = HttpRecognitionClient::new(&config).context("无法创建识别服务客户端")?;
        debug!("识别服务地址解析为 {}", client.endpoint());

        Ok(Self::with_client(&config, Arc::new(client), json_output))
    }

    /// 使用指定的识别客户端创建应用
    pub fn with_client(config: &Config, client: Arc<dyn RecognitionClient>, json_output: bool) -> Self {
        Self {
            orchestrator: UploadOrchestrator::new(client, config),
            json_output,
        }
    }

    pub fn orchestrator(&self) -> &UploadOrchestrator {
        &self.orchestrator
    }

    /// 加载并提交一批文件
    ///
    /// 超过大小上限的文件不读取内容。
    /// 校验失败时返回错误，错误信息同时记录在批处理状态里
    pub async fn submit_paths(&mut self, paths: &[PathBuf]) -> Result<BatchOutcome> {
        info!("📁 正在加载 {} 个文件...", paths.len());
        let limit = self.orchestrator.validator().max_file_size_bytes();
        let files = load_uploaded_files(paths, limit).await?;

        let outcome = self.orchestrator.submit(files).await?;
        Ok(outcome)
    }

    /// 渲染当前状态
    pub fn render(&self) -> Result<String> {
        let state = self.orchestrator.state();

        if self.json_output {
            let json = serde_json::to_string_pretty(state.results()).context("结果序列化失败")?;
            return Ok(json + "\n");
        }

        let mut out = String::new();
        if let Some(banner) = render_error_banner(state.error()) {
            out.push_str(&banner);
        }
        out.push_str(&render_files(state.files()));
        out.push_str(&render_results(state.results()));
        Ok(out)
    }

    /// 在标准输入输出上运行交互式会话
    pub async fn run_interactive(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_session(stdin, &mut stdout).await
    }

    /// 逐行读取命令直到 `quit` 或输入结束
    pub async fn run_session<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        write!(out, "{}", HELP_TEXT)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await.context("读取输入失败")? else {
                break;
            };

            let command = match SessionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(out, "{}", message)?;
                    continue;
                }
            };

            if !self.execute(command, out).await? {
                break;
            }
        }

        Ok(())
    }

    /// 执行一条命令，返回是否继续会话
    async fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<bool> {
        match command {
            SessionCommand::Add(paths) => {
                if let Err(e) = self.submit_paths(&paths).await {
                    warn!("⚠️ 提交失败: {:#}", e);
                    writeln!(out, "Upload failed: {:#}", e)?;
                }
                write!(out, "{}", self.render()?)?;
            }
            SessionCommand::Remove(name) => {
                self.orchestrator.remove_file(&name);
                write!(out, "{}", self.render()?)?;
            }
            SessionCommand::List => {
                write!(out, "{}", render_files(self.orchestrator.state().files()))?;
            }
            SessionCommand::Results => {
                write!(out, "{}", render_results(self.orchestrator.state().results()))?;
            }
            SessionCommand::Dismiss => {
                self.orchestrator.dismiss_error();
                writeln!(out, "Error dismissed")?;
            }
            SessionCommand::Help => write!(out, "{}", HELP_TEXT)?,
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use crate::models::UploadedFile;
    use async_trait::async_trait;

    struct FixedClient;

    #[async_trait]
    impl RecognitionClient for FixedClient {
        async fn recognize(&self, file: &UploadedFile) -> Result<Vec<String>, RequestError> {
            Ok(vec![format!("{}", file.size)])
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("meter_ocr_app_{}_{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_session_add_remove() {
        let dir = temp_dir("session");
        let png = dir.join("meter1.png");
        std::fs::write(&png, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
        let txt = dir.join("notes.txt");
        std::fs::write(&txt, b"not an image").unwrap();

        let mut app = App::with_client(&Config::default(), Arc::new(FixedClient), false);
        let script = format!(
            "add {}\nresults\nadd {}\nbogus\ndismiss\nremove meter1.png\nlist\nquit\nadd {}\n",
            png.display(),
            txt.display(),
            png.display()
        );

        let mut out = Vec::new();
        app.run_session(script.as_bytes(), &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("✅ [success] meter1.png: 8"));
        assert!(out.contains("Please upload only image files"));
        assert!(out.contains("unknown command: bogus"));
        assert!(out.contains("Error dismissed"));
        assert!(out.contains("No files uploaded"));

        // quit 之后的命令不再执行
        let state = app.orchestrator().state();
        assert!(state.files().is_empty());
        assert!(state.results().is_empty());
        assert!(state.error().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_json_render() {
        let dir = temp_dir("json");
        let jpg = dir.join("meter2.jpg");
        std::fs::write(&jpg, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let mut app = App::with_client(&Config::default(), Arc::new(FixedClient), true);
        let outcome = app.submit_paths(&[jpg]).await.unwrap();
        assert!(matches!(outcome, BatchOutcome::Settled(ref r) if r.len() == 1));

        let rendered: serde_json::Value = serde_json::from_str(&app.render().unwrap()).unwrap();
        assert_eq!(rendered[0]["fileName"], "meter2.jpg");
        assert_eq!(rendered[0]["status"], "success");
        assert_eq!(rendered[0]["extractedText"], "4");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_oversized_path_rejected() {
        let dir = temp_dir("oversized");
        let big = dir.join("big.png");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.resize(4096, 0);
        std::fs::write(&big, &bytes).unwrap();

        let config = Config {
            max_file_size_bytes: 1024,
            ..Config::default()
        };
        let mut app = App::with_client(&config, Arc::new(FixedClient), false);
        let err = app.submit_paths(&[big]).await.unwrap_err();

        assert!(err.to_string().starts_with("File size should not exceed"));
        assert!(app.orchestrator().state().files().is_empty());
        assert!(app.orchestrator().state().results().is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_initialize_rejects_bad_endpoint() {
        let config = Config {
            recognition_endpoint: "::not-a-url::".to_string(),
            ..Config::default()
        };
        assert!(App::initialize(config, false).is_err());

        let config = Config {
            recognition_endpoint: "http://127.0.0.1:9/process-image".to_string(),
            ..Config::default()
        };
        assert!(App::initialize(config, false).is_ok());
    }
}
