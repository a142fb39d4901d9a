//! Per-file conversion jobs
//!
//! Each job streams one input file through a [`G711Writer`] into a sibling
//! file named after the output format.

use anyhow::{bail, Context, Result};
use g711_core::utils::validation::is_sample_aligned;
use g711_core::{Conversion, Format, G711Writer};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions accepted as LPCM input by `encode`
pub const LPCM_EXTENSIONS: &[&str] = &["wav", "raw", "sln"];

/// Extension written by `decode`
pub const DECODED_EXTENSION: &str = "raw";

/// Lowercased extension of `path`, empty when there is none
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Pick the G.711 law of an encoded file from its extension
pub fn law_from_extension(path: &Path) -> Result<Format> {
    match extension(path).as_str() {
        "alaw" | "al" => Ok(Format::Alaw),
        "ulaw" | "ul" => Ok(Format::Ulaw),
        _ => bail!("unrecognised G.711 file extension: {}", path.display()),
    }
}

/// Encode an LPCM file (`.wav`, `.raw` or `.sln`) to `law`
pub fn encode_file(input: &Path, law: Format, wav_header: u64) -> Result<PathBuf> {
    if !LPCM_EXTENSIONS.contains(&extension(input).as_str()) {
        bail!("unrecognised format for input file: {}", input.display());
    }
    let conversion = Conversion::resolve(Format::Lpcm, law)?;
    convert_file(input, conversion, law.name(), wav_header)
}

/// Decode an A-law or μ-law file to raw LPCM, law chosen by extension
pub fn decode_file(input: &Path) -> Result<PathBuf> {
    let conversion = Conversion::resolve(law_from_extension(input)?, Format::Lpcm)?;
    convert_file(input, conversion, DECODED_EXTENSION, 0)
}

/// Stream `input` through `conversion` into `<stem>.<output_extension>`
///
/// A `.wav` input has its first `wav_header` bytes skipped. A partially
/// written output file is removed when the conversion fails.
pub fn convert_file(
    input: &Path,
    conversion: Conversion,
    output_extension: &str,
    wav_header: u64,
) -> Result<PathBuf> {
    let output = input.with_extension(output_extension);
    if output == input {
        bail!("output would overwrite input file: {}", input.display());
    }

    let mut source =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let mut skipped = 0;
    if extension(input) == "wav" {
        source
            .seek(SeekFrom::Start(wav_header))
            .with_context(|| format!("failed to skip WAV header of {}", input.display()))?;
        skipped = wav_header;
    }

    let len = source.metadata()?.len().saturating_sub(skipped);
    if !is_sample_aligned(conversion, len as usize) {
        warn!(
            file = %input.display(),
            len,
            "input ends with an incomplete LPCM sample, dropping it"
        );
    }

    let sink =
        File::create(&output).with_context(|| format!("failed to create {}", output.display()))?;
    debug!(input = %input.display(), output = %output.display(), %conversion, "converting");

    if let Err(err) = stream(source, sink, conversion) {
        // Best effort; the conversion error is what gets reported
        let _ = fs::remove_file(&output);
        return Err(err.context(format!(
            "failed to convert {} to {}",
            input.display(),
            output.display()
        )));
    }

    Ok(output)
}

fn stream(source: File, sink: File, conversion: Conversion) -> Result<()> {
    let mut reader = BufReader::new(source);
    let mut writer = G711Writer::with_conversion(BufWriter::new(sink), conversion);

    let copied = io::copy(&mut reader, &mut writer)?;
    let sink = writer
        .close()?
        .context("writer was closed before the copy finished")?;
    sink.into_inner()?.sync_all()?;

    debug!(copied, "stream finished");
    Ok(())
}
