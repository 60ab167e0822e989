use anyhow::Context;
use clap::Parser;
use ruleset_etl::utils::logger::{self, LogFormat};
use ruleset_etl::utils::validation::Validate;
use ruleset_etl::{
    CliConfig, Command, EtlEngine, LocalStorage, RawPipeline, RulesetError, TechsPipeline,
    UnitsPipeline,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_flag(cli.json_logs), cli.verbose)
        .context("Failed to initialise logging")?;

    tracing::info!("Starting ruleset-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            if let Some(path) = &cli.config {
                tracing::error!("❌ Failed to load config file '{}'", path);
            }
            fail(e)
        }
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::default();
    let result = match &cli.command {
        Command::Parse { .. } => EtlEngine::new(RawPipeline::new(storage, settings)).run(),
        Command::Units { .. } => EtlEngine::new(UnitsPipeline::new(storage, settings)).run(),
        Command::Techs { .. } => EtlEngine::new(TechsPipeline::new(storage, settings)).run(),
    };

    match result {
        Ok(output_path) => {
            println!("✅ Done");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: RulesetError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
