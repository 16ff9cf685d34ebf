use anyhow::Result;
use better_name::utils::{logger, validation::Validate};
use better_name::{format_name, CliConfig, NameFormatter};
use clap::Parser;

fn main() -> Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.is_demo() {
        run_demo();
        return Ok(());
    }

    if config.print {
        #[allow(deprecated)]
        better_name::print_name(config.first_name(), config.last_name());
        return Ok(());
    }

    let formatter = NameFormatter::with_max_length(config.max_length)?;
    let name = formatter.format(config.first_name(), config.last_name());
    tracing::debug!("Formatted '{}' + '{}' -> '{}'", config.first_name(), config.last_name(), name);
    println!("{}", name);

    Ok(())
}

/// 示範兩種格式化方式
fn run_demo() {
    tracing::info!("No names given, running demo");

    #[allow(deprecated)]
    better_name::print_name("miky", "novak");

    let name = format_name("jana", "svobodova");
    println!("Returned name: {}", name);
}
