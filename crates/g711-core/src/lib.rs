//! # G711-Core: ITU-T G.711 Companding Library
//!
//! A-law and μ-law compression of 16-bit linear PCM, expansion back to PCM,
//! direct transcoding between the two laws, and streaming adapters that
//! apply any of these conversions to byte streams split at arbitrary
//! boundaries.
//!
//! ## Features
//!
//! - **Companding engine**: per-sample and per-buffer encode/decode that is
//!   bit-exact with the ITU-T reference for all 65536 inputs
//! - **Lookup tables**: static 256-entry tables for decoding and transcoding
//! - **Streaming adapters**: [`G711Writer`] over any [`std::io::Write`] and
//!   [`G711Reader`] over any [`std::io::Read`]
//! - **Frame codecs**: PCMA/PCMU through the [`AudioCodec`] trait
//!
//! ## Usage
//!
//! ```rust
//! use g711_core::{CodecFactory, CodecType, Format};
//! use std::io::Write;
//!
//! // Frame codec
//! let mut codec = CodecFactory::create(CodecType::G711Pcmu);
//! let samples = vec![0i16; 160]; // 20ms at 8kHz
//! let encoded = codec.encode(&samples)?;
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded, samples);
//!
//! // Streaming: LPCM bytes in, A-law bytes out
//! let mut writer = CodecFactory::writer(Vec::new(), Format::Lpcm, Format::Alaw)?;
//! writer.write_all(&[0x01, 0x00, 0x7c, 0x7f])?;
//! assert_eq!(writer.get_ref(), Some(&vec![0xd5, 0xaa]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! All byte streams carry LPCM as signed 16-bit little-endian samples.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod stream;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::g711::{
    alaw_to_ulaw, decode_alaw, decode_ulaw, encode_alaw, encode_ulaw, ulaw_to_alaw, G711Codec,
};
pub use codecs::CodecFactory;
pub use error::{CodecError, ErrorCategory, Result};
pub use stream::{G711Reader, G711Writer, StreamBuilder};
pub use types::{AudioCodec, CodecInfo, CodecType, Conversion, Format};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported format names
pub const SUPPORTED_FORMATS: &[&str] = &["alaw", "ulaw", "lpcm"];

/// Initialize the library
///
/// Installs a default `tracing` subscriber unless the application already
/// set one. Safe to call multiple times.
///
/// # Errors
///
/// Currently never fails; the signature leaves room for setup that can.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("G711-Core v{} initialized", VERSION);
    tracing::info!("Supported formats: {:?}", SUPPORTED_FORMATS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_formats: SUPPORTED_FORMATS.to_vec(),
        supported_codecs: CodecFactory::supported_codecs(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Format names accepted by [`Format::from_str`](std::str::FromStr)
    pub supported_formats: Vec<&'static str>,
    /// Frame codec names accepted by [`CodecFactory::create_by_name`]
    pub supported_codecs: Vec<&'static str>,
}
