//! tessocr CLI - run tesseract over images from the command line.

mod cli_args;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use tessocr_config::Config;
use tessocr_core::{OcrEngine, RecognizerSettings, TesseractEngine};

pub use cli_args::Cli;
use output::format_result;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli);

    let config = Config::load_with_overrides(cli.config.as_deref(), cli.config_overrides())?;
    debug!("Loaded configuration: {:?}", config);

    let settings = RecognizerSettings::from(&config.tesseract);
    let engine = TesseractEngine::new(settings)?;

    if cli.check {
        let version = engine.version()?;
        println!("{}: {}", engine.name(), version);
        return Ok(());
    }

    let multiple = cli.images.len() > 1;
    for (index, image) in cli.images.iter().enumerate() {
        let text = engine
            .recognize_file(image)
            .await
            .with_context(|| format!("Failed to recognize {}", image))?;
        print!("{}", format_result(image, &text, multiple, index == 0));
    }

    Ok(())
}

fn initialize_logging(cli: &Cli) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if cli.verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for target in ["tessocr", "tessocr_cli", "tessocr_core", "tessocr_config"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
