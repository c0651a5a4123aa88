use clap::Parser;
use gherkin_gen::core::prompt::load_patterns;
use gherkin_gen::core::ConfigProvider;
use gherkin_gen::utils::logger;
use gherkin_gen::{
    CliConfig, FileSink, GeminiClient, GenerationEngine, GherkinGenerator, PromptBuilder, Result,
    Settings, StdoutSink,
};

async fn run(settings: &Settings) -> Result<String> {
    let patterns = load_patterns(settings.patterns_path())?;
    let generator = GherkinGenerator::new(
        GeminiClient::from_config(settings),
        PromptBuilder::new(patterns),
    )
    .with_cleaning(settings.clean_output());
    let sources = settings.sources();

    match settings.output_path() {
        Some(path) => {
            GenerationEngine::new(generator, FileSink::new(path))
                .with_format(settings.output_format())
                .run(&sources)
                .await
        }
        None => {
            GenerationEngine::new(generator, StdoutSink)
                .with_format(settings.output_format())
                .run(&sources)
                .await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gherkin-gen");

    let result = match Settings::resolve(&cli) {
        Ok(settings) => {
            tracing::debug!("Settings: {:?}", settings);
            run(&settings).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(location) => {
            tracing::info!("✅ Test cases generated");
            tracing::info!("📁 Output written to: {}", location);
        }
        Err(e) => {
            let category = e.category();
            tracing::error!("❌ Generation failed: {} (Category: {:?})", e, category);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(category.exit_code());
        }
    }
}
