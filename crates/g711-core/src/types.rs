//! Core types and traits for the G.711 library
//!
//! This module defines the format tags, the resolved conversion that a
//! streaming adapter dispatches on, and the frame codec trait.

use crate::error::{CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Sample format of a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// G.711 A-law, one byte per sample
    Alaw,
    /// G.711 μ-law, one byte per sample
    Ulaw,
    /// 16-bit signed little-endian linear PCM, two bytes per sample
    Lpcm,
}

impl Format {
    /// All known formats
    pub const ALL: [Format; 3] = [Format::Alaw, Format::Ulaw, Format::Lpcm];

    /// Get the format name as used on the command line and in file extensions
    pub fn name(self) -> &'static str {
        match self {
            Self::Alaw => "alaw",
            Self::Ulaw => "ulaw",
            Self::Lpcm => "lpcm",
        }
    }

    /// Number of bytes one sample occupies in this format
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Alaw | Self::Ulaw => 1,
            Self::Lpcm => 2,
        }
    }

    /// Check if this is one of the two companded laws
    pub fn is_companded(self) -> bool {
        matches!(self, Self::Alaw | Self::Ulaw)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alaw" => Ok(Self::Alaw),
            "ulaw" => Ok(Self::Ulaw),
            "lpcm" => Ok(Self::Lpcm),
            _ => Err(CodecError::unsupported_format(s)),
        }
    }
}

/// A resolved input/output conversion
///
/// Chosen once by [`Conversion::resolve`] and then matched once per buffer,
/// so no format branching happens per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// LPCM to A-law
    EncodeAlaw,
    /// LPCM to μ-law
    EncodeUlaw,
    /// A-law to LPCM
    DecodeAlaw,
    /// μ-law to LPCM
    DecodeUlaw,
    /// A-law to μ-law
    AlawToUlaw,
    /// μ-law to A-law
    UlawToAlaw,
}

impl Conversion {
    /// Every supported conversion
    pub const ALL: [Conversion; 6] = [
        Conversion::EncodeAlaw,
        Conversion::EncodeUlaw,
        Conversion::DecodeAlaw,
        Conversion::DecodeUlaw,
        Conversion::AlawToUlaw,
        Conversion::UlawToAlaw,
    ];

    /// Resolve an input/output format pair into a conversion
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for the three identity pairs.
    pub fn resolve(input: Format, output: Format) -> Result<Self> {
        match (input, output) {
            (Format::Lpcm, Format::Alaw) => Ok(Self::EncodeAlaw),
            (Format::Lpcm, Format::Ulaw) => Ok(Self::EncodeUlaw),
            (Format::Alaw, Format::Lpcm) => Ok(Self::DecodeAlaw),
            (Format::Ulaw, Format::Lpcm) => Ok(Self::DecodeUlaw),
            (Format::Alaw, Format::Ulaw) => Ok(Self::AlawToUlaw),
            (Format::Ulaw, Format::Alaw) => Ok(Self::UlawToAlaw),
            (input, output) => Err(CodecError::invalid_format_pair(input, output)),
        }
    }

    /// Resolve a pair of format names such as `"lpcm"` and `"alaw"`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedFormat`] for an unknown name and
    /// [`CodecError::InvalidFormatPair`] for an identity pair.
    pub fn resolve_names(input: &str, output: &str) -> Result<Self> {
        Self::resolve(input.parse()?, output.parse()?)
    }

    /// Format consumed by this conversion
    pub fn input(self) -> Format {
        match self {
            Self::EncodeAlaw | Self::EncodeUlaw => Format::Lpcm,
            Self::DecodeAlaw | Self::AlawToUlaw => Format::Alaw,
            Self::DecodeUlaw | Self::UlawToAlaw => Format::Ulaw,
        }
    }

    /// Format produced by this conversion
    pub fn output(self) -> Format {
        match self {
            Self::EncodeAlaw | Self::UlawToAlaw => Format::Alaw,
            Self::EncodeUlaw | Self::AlawToUlaw => Format::Ulaw,
            Self::DecodeAlaw | Self::DecodeUlaw => Format::Lpcm,
        }
    }

    /// Bytes per sample on the input side
    pub fn input_unit(self) -> usize {
        self.input().bytes_per_sample()
    }

    /// Bytes per sample on the output side
    pub fn output_unit(self) -> usize {
        self.output().bytes_per_sample()
    }

    /// Output bytes produced per input byte
    ///
    /// 0.5 when compressing LPCM, 2.0 when expanding to LPCM and 1.0 when
    /// transcoding between the laws.
    pub fn ratio(self) -> f64 {
        self.output_unit() as f64 / self.input_unit() as f64
    }

    /// Number of output bytes produced for `input_len` input bytes
    ///
    /// A trailing incomplete input sample produces nothing.
    pub fn output_len(self, input_len: usize) -> usize {
        input_len / self.input_unit() * self.output_unit()
    }

    /// Number of input bytes needed to produce `output_len` output bytes
    pub fn input_len(self, output_len: usize) -> usize {
        output_len.div_ceil(self.output_unit()) * self.input_unit()
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input(), self.output())
    }
}

/// Primary trait for frame-oriented audio codecs
///
/// Operates on `i16` sample slices instead of raw LPCM bytes.
pub trait AudioCodec: Send + Sync {
    /// Encode audio samples to compressed data
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or input is invalid
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to audio samples
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or data is invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name ("PCMA" or "PCMU")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// RTP payload type (if standard)
    pub payload_type: Option<u8>,
}

/// Frame codec types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    /// G.711 μ-law (PCMU)
    G711Pcmu,
    /// G.711 A-law (PCMA)
    G711Pcma,
}

impl CodecType {
    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::G711Pcmu => "PCMU",
            Self::G711Pcma => "PCMA",
        }
    }

    /// Get the companded format this codec produces
    pub fn format(self) -> Format {
        match self {
            Self::G711Pcmu => Format::Ulaw,
            Self::G711Pcma => Format::Alaw,
        }
    }

    /// Get the standard RTP payload type
    pub fn payload_type(self) -> u8 {
        match self {
            Self::G711Pcmu => 0,
            Self::G711Pcma => 8,
        }
    }

    /// Sample rate fixed by the standard
    pub fn sample_rate(self) -> u32 {
        8000
    }

    /// Bitrate fixed by the standard
    pub fn bitrate(self) -> u32 {
        64000
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
