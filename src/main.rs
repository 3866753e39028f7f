//! # karaoke - share karaoke sessions as links
//!
//! Encodes a time-aligned lyric transcript into a compact token that fits in a
//! URL path segment, and reads such tokens (or whole share links) back.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a JSON transcript
//! karaoke encode song.json
//!
//! # Build a share link against a specific origin
//! karaoke link song.json --origin https://karaoke.example.com
//!
//! # Read a link back
//! karaoke extract "https://karaoke.example.com/karaoke/<token>"
//! ```

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use karaoke_share::cli::{self, Command};
use karaoke_share::config::ShareConfig;
use karaoke_share::{completion, decode, lyrics, share, KaraokeDocument};
use log::{debug, info};
use std::io::Read;
use std::path::Path;

/// Read a JSON transcript from a file, or from stdin for `None` / `-`.
fn read_document(input: Option<&Path>) -> Result<KaraokeDocument> {
    let raw = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read transcript from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context(
        "Transcript must be JSON like {\"videoId\": \"...\", \"lines\": [{\"text\": \"...\", \"time\": 1.5}]}",
    )
}

fn load_config(args: &cli::Args) -> Result<ShareConfig> {
    let config = match &args.config {
        Some(path) => ShareConfig::from_file(path)?,
        None => ShareConfig::load()?,
    };
    Ok(config.with_overrides(args.origin.clone(), args.framing))
}

/// A token, a share link, or a karaoke path, decoded to its document.
fn document_from_source(source: &str) -> Result<KaraokeDocument> {
    let path = share::link_path(source)?;
    if let Some(token) = share::token_from_path(&path) {
        debug!("Treating {source:?} as a share link");
        return Ok(decode(token)?);
    }
    Ok(decode(source)?)
}

fn print_json(document: &KaraokeDocument) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

/// Main entry point for the karaoke CLI.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug karaoke decode <token>` - see why a token is rejected
/// - `RUST_LOG=karaoke_share=trace karaoke encode song.json` - canonical text
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = load_config(&args)?;
    let encoder = config.encoder();
    debug!("Using origin {} with {:?} framing", config.origin, encoder.framing());

    match args.command {
        Command::Encode { input } => {
            let document = read_document(input.as_deref())?;
            let token = encoder
                .encode_document(&document)
                .context("Failed to encode transcript")?;
            println!("{token}");
        }
        Command::Decode { token } => {
            let document = decode(token.trim())?;
            print_json(&document)?;
        }
        Command::Link { input } => {
            let document = read_document(input.as_deref())?;
            let url = share::build_share_link_with(
                &encoder,
                &config.origin,
                &document.video_id,
                &document.lines,
            )
            .context("Failed to build share link")?;
            info!("Built share link for video {}", document.video_id);
            println!("{url}");
        }
        Command::Extract { link } => {
            let path = share::link_path(link.trim())?;
            match share::extract_from_link(&path)? {
                Some(document) => print_json(&document)?,
                None => bail!("No karaoke data in {link}"),
            }
        }
        Command::Estimate { input, json } => {
            let document = read_document(input.as_deref())?;
            let estimate = share::estimate_encoded_size_with(
                &encoder,
                &config.origin,
                &document.video_id,
                &document.lines,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                println!("Token length:      {}", estimate.token_length);
                println!("Approximate bytes: {}", estimate.approximate_byte_size);
                println!("URL length:        {}", estimate.full_url_length);
                println!("URL:               {}", estimate.full_url);
            }
        }
        Command::Lyrics { source } => {
            let document = document_from_source(source.trim())?;
            println!("{}", lyrics::to_bracketed_lyrics(&document.lines));
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
