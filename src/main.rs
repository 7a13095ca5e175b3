use anyhow::Result;
use clap::Parser;
use meter_reading_ocr::utils::logging;
use meter_reading_ocr::{App, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meter-ocr")]
#[command(about = "Upload meter photos and read the numbers recognised by the OCR service")]
#[command(version)]
struct Args {
    /// Image files to upload as one batch
    files: Vec<PathBuf>,

    /// Recognition endpoint URL (overrides config file and RECOGNITION_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "METER_OCR_CONFIG")]
    config: Option<PathBuf>,

    /// Keep the session open and read commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置：默认值 < 配置文件 < 环境变量 < 命令行
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };
    if let Some(endpoint) = args.endpoint {
        config.recognition_endpoint = endpoint;
    }
    config.verbose_logging |= args.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut app = App::initialize(config, args.json)?;

    if !args.files.is_empty() {
        let submitted = app.submit_paths(&args.files).await;
        print!("{}", app.render()?);
        if !args.interactive {
            submitted?;
        }
    }

    if args.interactive {
        app.run_interactive().await?;
    }

    Ok(())
}
