//! # Command-Line Interface Module
//!
//! Clap definitions for the `karaoke` binary.
//!
//! ## Commands
//!
//! - `encode`: Turn a JSON transcript into a token
//! - `decode`: Turn a token back into a JSON transcript
//! - `link`: Build a full share link
//! - `extract`: Read the transcript out of a share link
//! - `estimate`: Report token and link sizes
//! - `lyrics`: Print the `text [m:ss]` lyric sheet for a token or link
//!
//! ## Examples
//!
//! ```bash
//! karaoke encode song.json
//! karaoke link song.json --origin https://karaoke.example.com
//! karaoke extract "https://karaoke.example.com/karaoke/eNpj..."
//! ```

use crate::serializer::Framing;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Global options apply to every subcommand and override the config file.
#[derive(Parser, Debug)]
#[command(name = "karaoke")]
#[command(about = "Encode karaoke lyric transcripts into compact share links")]
#[command(version)]
pub struct Args {
    /// Origin share links are built against (scheme and host)
    #[arg(long, global = true, env = "KARAOKE_ORIGIN", value_hint = clap::ValueHint::Url)]
    pub origin: Option<String>,

    /// Layout of newly encoded tokens
    ///
    /// "delimited" produces tokens the web player can read;
    /// "length-prefixed" keeps any lyric text intact.
    #[arg(long, global = true, value_enum)]
    pub framing: Option<Framing>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a transcript into a URL-safe token
    ///
    /// Reads a JSON document of the form
    /// {"videoId": "...", "lines": [{"text": "...", "time": 1.5}, ...]}
    /// from FILE, or from stdin when FILE is omitted or "-".
    Encode {
        /// JSON transcript to encode
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Decode a token and print the transcript as JSON
    Decode {
        /// Token produced by `encode` or taken from a share link
        token: String,
    },

    /// Build a full share link for a transcript
    Link {
        /// JSON transcript (stdin when omitted or "-")
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Print the transcript carried by a share link or path
    ///
    /// Links outside /karaoke/ are reported as carrying no karaoke data.
    Extract {
        /// Full URL or path, e.g. /karaoke/<token>
        #[arg(value_hint = clap::ValueHint::Url)]
        link: String,
    },

    /// Report how large the token and link for a transcript come out
    Estimate {
        /// JSON transcript (stdin when omitted or "-")
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the lyric sheet ("text [m:ss]" per line) for a token or link
    Lyrics {
        /// Token, share link, or /karaoke/ path
        source: String,
    },

    /// Generate shell completions
    ///
    /// Usage: karaoke completion bash > ~/.local/share/bash-completion/completions/karaoke
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
