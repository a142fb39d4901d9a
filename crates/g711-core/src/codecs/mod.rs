//! Codec implementations and factory

use crate::error::{CodecError, Result};
use crate::stream::{G711Reader, G711Writer};
use crate::types::{AudioCodec, CodecType, Conversion, Format};
use std::io::{Read, Write};

pub mod g711;

/// Codec factory for creating adapters and frame codecs
pub struct CodecFactory;

impl CodecFactory {
    /// Create a streaming writer converting `input` to `output`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair.
    pub fn writer<W: Write>(sink: W, input: Format, output: Format) -> Result<G711Writer<W>> {
        G711Writer::new(sink, input, output)
    }

    /// Create a streaming reader converting `input` to `output`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair.
    pub fn reader<R: Read>(source: R, input: Format, output: Format) -> Result<G711Reader<R>> {
        G711Reader::new(source, input, output)
    }

    /// Create a frame codec instance
    pub fn create(codec_type: CodecType) -> Box<dyn AudioCodec> {
        Box::new(g711::G711Codec::new(codec_type))
    }

    /// Create a frame codec by name
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedCodec`] for anything but PCMU/PCMA.
    pub fn create_by_name(name: &str) -> Result<Box<dyn AudioCodec>> {
        let codec_type = match name.to_uppercase().as_str() {
            "PCMU" => CodecType::G711Pcmu,
            "PCMA" => CodecType::G711Pcma,
            _ => return Err(CodecError::unsupported_codec(name)),
        };

        Ok(Self::create(codec_type))
    }

    /// Create a frame codec by RTP payload type
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedCodec`] for anything but 0 and 8.
    pub fn create_by_payload_type(payload_type: u8) -> Result<Box<dyn AudioCodec>> {
        let codec_type = match payload_type {
            0 => CodecType::G711Pcmu,
            8 => CodecType::G711Pcma,
            _ => return Err(CodecError::unsupported_codec(format!("PT{}", payload_type))),
        };

        Ok(Self::create(codec_type))
    }

    /// Get all supported codec names
    pub fn supported_codecs() -> Vec<&'static str> {
        vec!["PCMU", "PCMA"]
    }

    /// Check if a codec is supported
    pub fn is_supported(name: &str) -> bool {
        Self::supported_codecs().contains(&name.to_uppercase().as_str())
    }

    /// Get every conversion a streaming adapter can perform
    pub fn supported_conversions() -> Vec<Conversion> {
        Conversion::ALL.to_vec()
    }
}
