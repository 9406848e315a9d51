//! Print the OpenAPI document as JSON or YAML.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use quest_backend::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Render the quest API description", version)]
struct CliArgs {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let doc = ApiDoc::openapi();
    let rendered = match args.format {
        Format::Json => doc.to_pretty_json()?,
        Format::Yaml => doc.to_yaml()?,
    };
    match args.output {
        Some(path) => std::fs::write(&path, rendered)
            .wrap_err_with(|| format!("write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
