//! kizami command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use kizami_cli::{
    cli::{Cli, FormatArg, UnitArg},
    output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter},
    pages::split_pages,
};
use kizami_api::{ApiError, ChunkProcessor, Config, Input};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let invalid = err
                .downcast_ref::<ApiError>()
                .map(ApiError::is_invalid_parameter)
                .unwrap_or(false);
            if invalid {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Off
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn build_config(cli: &Cli) -> Result<Config> {
    let builder = Config::builder()
        .chunk_size(cli.size)
        .overlap_percentage(cli.overlap)
        .preserve_word_boundaries(!cli.no_word_boundaries)
        .instrument(cli.verbose >= 2);
    let builder = match cli.unit {
        UnitArg::Chars => builder.characters(),
        UnitArg::Tokens => builder.tokens(),
    };
    Ok(builder.build()?)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let mut processor = ChunkProcessor::with_config(config);

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut formatter: Box<dyn OutputFormatter> = match cli.format {
        FormatArg::Text => Box::new(TextFormatter::new(writer)),
        FormatArg::Json => Box::new(JsonFormatter::new(writer)),
        FormatArg::Markdown => Box::new(MarkdownFormatter::new(writer)),
    };

    for path in &cli.inputs {
        let name = path.display().to_string();
        log::info!("chunking {name}");

        let text = read_input(path)?;
        let pages = split_pages(&text, cli.page_break);
        let output = processor
            .process(Input::from_pages(pages))
            .with_context(|| format!("failed to chunk {name}"))?;

        log::debug!(
            "{name}: {} chunk(s) in {:.1}ms",
            output.metadata.chunk_count,
            output.metadata.processing_time_ms
        );
        if cli.stats {
            eprintln!(
                "{name}: {} page(s), {} byte(s), {} chunk(s), {:.1}ms",
                output.metadata.page_count,
                output.metadata.total_bytes,
                output.metadata.chunk_count,
                output.metadata.processing_time_ms
            );
        }
        formatter.document(&name, &output)?;
    }

    formatter.finish()?;
    Ok(())
}
