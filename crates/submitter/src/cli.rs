//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use submitter_celestia::{decode_blob, encode_blob, BlobSubmitter};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::config;

/// Submit text blobs to Celestia through a light node.
#[derive(Parser)]
#[command(name = "celestia-submit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML `KEY = value` pairs). Missing keys fall back to
    /// the environment.
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Submit data as a blob and print the explorer link.
    Submit {
        /// Data to submit. Read from stdin when omitted, minus one trailing
        /// line ending.
        data: Option<String>,
    },

    /// Print the base64 blob encoding of some data.
    Encode {
        /// Data to encode (or decode, with --decode).
        data: String,

        /// Decode a blob back to its text instead.
        #[arg(short, long)]
        decode: bool,
    },

    /// Validate settings and print them with secrets redacted.
    CheckConfig,

    /// Write a settings file template.
    Init {
        /// Output path for the settings file.
        #[arg(short, long, default_value = "celestia.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Submit { data } => Self::submit(self.settings, data).await,
            Commands::Encode { data, decode } => Self::encode(&data, decode),
            Commands::CheckConfig => Self::check_config(self.settings),
            Commands::Init { output } => Self::init(output),
        }
    }

    async fn submit(settings: Option<PathBuf>, data: Option<String>) -> Result<()> {
        let config = config::load(settings.as_deref())?;

        let data = match data {
            Some(data) => data,
            None => {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                strip_line_ending(buf)
            }
        };

        let submitter = BlobSubmitter::from_config(&config)?;
        let receipt = submitter.submit(&data).await?;

        println!("{}", receipt.display_text);
        Ok(())
    }

    fn encode(data: &str, decode: bool) -> Result<()> {
        let output = if decode {
            decode_blob(data)?
        } else {
            encode_blob(data)?
        };
        println!("{output}");
        Ok(())
    }

    fn check_config(settings: Option<PathBuf>) -> Result<()> {
        let config = config::load(settings.as_deref())?;

        for (key, value) in config::summary(&config) {
            println!("{key:<28} {value}");
        }
        info!("Configuration is valid");
        Ok(())
    }

    fn init(output: PathBuf) -> Result<()> {
        if output.exists() {
            eyre::bail!("refusing to overwrite {}", output.display());
        }

        info!(path = %output.display(), "Writing settings template");
        std::fs::write(&output, config::template())?;
        Ok(())
    }
}

/// Drop a single trailing `\n` or `\r\n`, as left by `echo` or a heredoc.
fn strip_line_ending(mut data: String) -> String {
    if data.ends_with('\n') {
        data.pop();
        if data.ends_with('\r') {
            data.pop();
        }
    }
    data
}
