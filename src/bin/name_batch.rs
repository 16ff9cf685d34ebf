use anyhow::Result;
use better_name::core::Pipeline;
use better_name::utils::{logger, validation::Validate};
use better_name::{BatchConfig, BatchEngine, BatchPipeline, LocalStorage, NameError};
use clap::Parser;

#[derive(Parser)]
#[command(name = "name-batch")]
#[command(about = "Format every name pair in a CSV or JSON file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "name-batch.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override format.max_length from config
    #[arg(long)]
    max_length: Option<usize>,

    /// Dry run - print the formatted names without writing any output
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    if config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting name batch '{}'", config.batch.name);
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(max_length) = args.max_length {
        config
            .format
            .get_or_insert(better_name::config::toml_config::FormatConfig { max_length: None })
            .max_length = Some(max_length);
        tracing::info!("🔧 max_length overridden to: {}", max_length);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    display_config_summary(&config);

    let source = LocalStorage::new(".");
    let sink = LocalStorage::new(config.output_path());
    let pipeline = match BatchPipeline::new(source, sink, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output files will be written");
        if let Err(e) = perform_dry_run(&pipeline) {
            fail(&e);
        }
        return Ok(());
    }

    let engine = BatchEngine::new(pipeline);
    match engine.run() {
        Ok(summary) => {
            tracing::info!("✅ Name batch completed successfully!");
            println!(
                "✅ Formatted {} of {} names ({} skipped, {} truncated)",
                summary.formatted, summary.read, summary.skipped, summary.truncated
            );
            for output in &summary.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &NameError) -> ! {
    tracing::error!(
        "❌ Name batch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.exit_code())
}

fn display_config_summary(config: &BatchConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        tracing::info!("  Description: {}", description);
    }
    tracing::info!("  Input: {} ({:?})", config.input_path(), config.input_format());
    tracing::info!("  Max length: {}", config.max_length());
    tracing::info!("  Output: {} {:?}", config.output_path(), config.output.formats);
}

fn perform_dry_run(pipeline: &BatchPipeline<LocalStorage>) -> better_name::Result<()> {
    let records = pipeline.extract()?;
    let result = pipeline.transform(records)?;

    for record in &result.records {
        println!("{}", record.formatted);
    }
    tracing::info!(
        "🔍 {} names would be written ({} truncated)",
        result.records.len(),
        result.truncated
    );
    Ok(())
}
