//! Convert Markdown into chat-platform message blocks.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a file
//! md-blockkit notes.md
//!
//! # Convert stdin
//! cat notes.md | md-blockkit
//!
//! # Single-line JSON
//! md-blockkit --compact notes.md
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use md_blockkit_config::Config;
use md_blockkit_engine::{Converter, IoError, io};

/// Convert Markdown to chat-platform message blocks (JSON)
#[derive(Parser)]
#[command(name = "md-blockkit", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Markdown file to convert. Reads from stdin when omitted
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Use this configuration file instead of the default
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print the intermediate token tree instead of blocks
    #[arg(long)]
    tokens: bool,
}

const AFTER_HELP: &str = "\
CONFIGURATION:
  Optional TOML file at ~/.config/md-blockkit/config.toml:

    bullet = \"• \"         # unordered list prefix
    header_emoji = true    # emoji flag on headers
    image_blocks = false   # lone images become image blocks
    pretty = true          # pretty-print JSON

EXAMPLES:
  md-blockkit README.md
  cat README.md | md-blockkit --compact
";

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<IoError>() {
            Some(IoError::NotFound(path)) => {
                eprintln!("Error: File not found at {}", path.display());
            }
            _ => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())
        .context("loading configuration")?
        .unwrap_or_default();
    log::debug!("using config {config:?}");

    let markdown = io::read_input(cli.file.as_deref())?;
    if markdown.trim().is_empty() {
        log::info!("input is blank, nothing to convert");
        return Ok(());
    }

    let converter = Converter::new(config.lex_options(), config.render_options());
    let pretty = config.pretty && !cli.compact;

    let json = if cli.tokens {
        let tokens = converter.tokens(&markdown);
        if pretty {
            serde_json::to_string_pretty(&tokens)?
        } else {
            serde_json::to_string(&tokens)?
        }
    } else {
        converter.convert(&markdown).to_json(pretty)?
    };

    println!("{json}");
    Ok(())
}
