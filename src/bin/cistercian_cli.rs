//! Cistercian CLI - render numbers as Cistercian numeral images
//!
//! Commands: render, export, describe
//! JSON goes to stdout, logs to stderr
//! Exit code 2 for out-of-range input, 1 for everything else

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{stderr, stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use cistercian_core::{OutputFormat, PipelineError, RenderConfig, RenderPipeline};

#[derive(Parser)]
#[command(name = "cistercian-cli")]
#[command(about = "Cistercian CLI - render integers as Cistercian numeral glyphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON render config (size, maxMagnitude, foreground, background, format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Glyph side in pixels
    #[arg(short, long, global = true)]
    size: Option<u32>,

    /// Largest accepted absolute value
    #[arg(long, global = true)]
    max: Option<u64>,

    /// Output image format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one number
    #[command(allow_negative_numbers = true)]
    Render {
        number: i64,

        /// Write the image here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print metadata and base64 image data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render every number in a range into a directory
    #[command(allow_negative_numbers = true)]
    Export {
        #[arg(long, default_value_t = 0)]
        start: i64,

        #[arg(long, default_value_t = 99_999)]
        end: i64,

        #[arg(short, long, default_value = "cistercian_numerals")]
        output_dir: PathBuf,
    },

    /// Print the glyph breakdown of a number as JSON
    #[command(allow_negative_numbers = true)]
    Describe { number: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cistercian_core={level},cistercian_cli={level}",
            level = default_level
        ))
    });
    registry().with(filter).with(fmt::layer().with_writer(stderr)).init();

    let pipeline = match build_pipeline(&cli) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Render { number, output, json } => render(&pipeline, number, output, json),
        Commands::Export { start, end, output_dir } => {
            pipeline.export_range(start, end, &output_dir).and_then(|manifest| {
                info!(files = manifest.files.len(), "export complete");
                print_json(&serde_json::json!({
                    "success": true,
                    "outputDir": output_dir,
                    "files": manifest.files.len(),
                    "manifestHash": manifest.manifest_hash,
                }))
            })
        }
        Commands::Describe { number } => pipeline.describe(number).and_then(|glyphs| {
            print_json(&serde_json::json!({
                "value": number,
                "glyphs": glyphs,
            }))
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let output = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            println!("{}", output);
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn build_pipeline(cli: &Cli) -> Result<RenderPipeline, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(max) = cli.max {
        config.max_magnitude = max;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    RenderPipeline::new(config)
}

fn render(
    pipeline: &RenderPipeline,
    number: i64,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), PipelineError> {
    let rendered = pipeline.render(number)?;

    if let Some(path) = &output {
        std::fs::write(path, &rendered.data)?;
        info!(path = %path.display(), hash = %rendered.hash, "wrote image");
    }

    if json {
        let mut value = serde_json::to_value(&rendered)?;
        if output.is_none() {
            value["dataBase64"] = serde_json::Value::String(rendered.data_base64());
        }
        print_json(&value)
    } else if output.is_none() {
        let mut out = stdout().lock();
        out.write_all(&rendered.data)?;
        out.flush()?;
        Ok(())
    } else {
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PipelineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
