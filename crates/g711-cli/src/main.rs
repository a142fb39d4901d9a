//! g711: encode, decode and transcode G.711 audio files
//!
//! ```text
//! g711 convert --in lpcm --out alaw tone.wav   # writes tone.alaw
//! g711 encode ulaw tone.raw                    # writes tone.ulaw
//! g711 decode tone.alaw                        # writes tone.raw
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use g711_core::{Conversion, Format};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod jobs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Encode, decode and transcode G.711 audio files", long_about = None)]
struct Cli {
    /// Log level filter (RUST_LOG takes precedence when set)
    #[arg(long, env = "G711_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Bytes to skip at the start of .wav inputs
    #[arg(long, env = "G711_WAV_HEADER", default_value_t = 44, global = true)]
    wav_header: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert files between any two of alaw, ulaw and lpcm
    Convert {
        /// Input format
        #[arg(long = "in", value_name = "FORMAT")]
        input: Format,

        /// Output format, also used as the output file extension
        #[arg(long = "out", value_name = "FORMAT")]
        output: Format,

        /// Files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Encode 16-bit 8kHz LPCM files (.wav, .raw, .sln) to G.711
    Encode {
        /// Target law
        law: Law,

        /// Files to encode
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Decode .alaw/.al and .ulaw/.ul files to raw LPCM
    Decode {
        /// Files to decode
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Law {
    Alaw,
    Ulaw,
}

impl From<Law> for Format {
    fn from(law: Law) -> Self {
        match law {
            Law::Alaw => Format::Alaw,
            Law::Ulaw => Format::Ulaw,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "Some files could not be processed");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the selected command, returning how many files failed
fn run(cli: &Cli) -> Result<usize> {
    let failed = match &cli.command {
        Command::Convert {
            input,
            output,
            files,
        } => {
            let conversion = Conversion::resolve(*input, *output)?;
            info!(%conversion, files = files.len(), "Converting");
            process(files, |file| {
                jobs::convert_file(file, conversion, output.name(), cli.wav_header)
            })
        }
        Command::Encode { law, files } => {
            let law = Format::from(*law);
            info!(%law, files = files.len(), "Encoding");
            process(files, |file| jobs::encode_file(file, law, cli.wav_header))
        }
        Command::Decode { files } => {
            info!(files = files.len(), "Decoding");
            process(files, jobs::decode_file)
        }
    };

    Ok(failed)
}

/// Attempt every file, logging each failure, and count the failures
fn process<F>(files: &[PathBuf], mut job: F) -> usize
where
    F: FnMut(&Path) -> Result<PathBuf>,
{
    let mut failed = 0;
    for file in files {
        match job(file) {
            Ok(output) => info!(input = %file.display(), output = %output.display(), "Done"),
            Err(err) => {
                error!(file = %file.display(), "{:#}", err);
                failed += 1;
            }
        }
    }
    failed
}
