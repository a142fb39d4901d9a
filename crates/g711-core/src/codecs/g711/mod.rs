//! G.711 companding engine
//!
//! Per-sample, per-buffer and per-frame forms of A-law/μ-law compression,
//! expansion and direct transcoding.
//!
//! All functions here are pure: they read only the constant tables in
//! [`tables`] and are safe to call from any number of threads.
//!
//! ```rust
//! use g711_core::codecs::g711::{decode_alaw, encode_alaw, alaw_to_ulaw};
//!
//! let code = encode_alaw(1000);
//! assert_eq!(decode_alaw(code), 1008);
//! assert_eq!(alaw_to_ulaw(code), 0xce);
//! ```

pub mod reference;
pub mod tables;

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::types::{AudioCodec, CodecInfo, CodecType, Conversion};
use crate::utils::validation::validate_buffer_sizes;
use bytes::{BufMut, BytesMut};

pub use reference::{alaw_compress, alaw_expand, ulaw_compress, ulaw_expand};

/// Frame size used by [`G711Codec`]: 20 ms at 8 kHz
pub const DEFAULT_FRAME_SIZE: usize = 160;

/// Encode one linear PCM sample to A-law
#[inline]
pub fn encode_alaw(sample: i16) -> u8 {
    reference::alaw_compress(sample)
}

/// Encode one linear PCM sample to μ-law
#[inline]
pub fn encode_ulaw(sample: i16) -> u8 {
    reference::ulaw_compress(sample)
}

/// Decode one A-law code to linear PCM
#[inline]
pub fn decode_alaw(code: u8) -> i16 {
    tables::alaw_expand_table(code)
}

/// Decode one μ-law code to linear PCM
#[inline]
pub fn decode_ulaw(code: u8) -> i16 {
    tables::ulaw_expand_table(code)
}

/// Convert one A-law code directly to μ-law
#[inline]
pub fn alaw_to_ulaw(code: u8) -> u8 {
    tables::alaw_to_ulaw_table(code)
}

/// Convert one μ-law code directly to A-law
#[inline]
pub fn ulaw_to_alaw(code: u8) -> u8 {
    tables::ulaw_to_alaw_table(code)
}

#[inline]
fn le_sample(pair: &[u8]) -> i16 {
    i16::from_le_bytes([pair[0], pair[1]])
}

/// Encode little-endian LPCM bytes to A-law
///
/// The output is half the input length; a trailing odd byte is dropped.
pub fn encode_alaw_buffer(lpcm: &[u8]) -> Vec<u8> {
    lpcm.chunks_exact(2).map(|pair| encode_alaw(le_sample(pair))).collect()
}

/// Encode little-endian LPCM bytes to μ-law
///
/// The output is half the input length; a trailing odd byte is dropped.
pub fn encode_ulaw_buffer(lpcm: &[u8]) -> Vec<u8> {
    lpcm.chunks_exact(2).map(|pair| encode_ulaw(le_sample(pair))).collect()
}

/// Decode A-law codes to little-endian LPCM bytes (twice the input length)
pub fn decode_alaw_buffer(alaw: &[u8]) -> Vec<u8> {
    alaw.iter().flat_map(|&code| decode_alaw(code).to_le_bytes()).collect()
}

/// Decode μ-law codes to little-endian LPCM bytes (twice the input length)
pub fn decode_ulaw_buffer(ulaw: &[u8]) -> Vec<u8> {
    ulaw.iter().flat_map(|&code| decode_ulaw(code).to_le_bytes()).collect()
}

/// Transcode A-law codes to μ-law
pub fn alaw_to_ulaw_buffer(alaw: &[u8]) -> Vec<u8> {
    alaw.iter().map(|&code| alaw_to_ulaw(code)).collect()
}

/// Transcode μ-law codes to A-law
pub fn ulaw_to_alaw_buffer(ulaw: &[u8]) -> Vec<u8> {
    ulaw.iter().map(|&code| ulaw_to_alaw(code)).collect()
}

/// Encode a slice of samples to A-law
pub fn encode_alaw_samples(samples: &[i16]) -> Vec<u8> {
    samples.iter().map(|&sample| encode_alaw(sample)).collect()
}

/// Encode a slice of samples to μ-law
pub fn encode_ulaw_samples(samples: &[i16]) -> Vec<u8> {
    samples.iter().map(|&sample| encode_ulaw(sample)).collect()
}

/// Decode A-law codes to samples
pub fn decode_alaw_samples(alaw: &[u8]) -> Vec<i16> {
    alaw.iter().map(|&code| decode_alaw(code)).collect()
}

/// Decode μ-law codes to samples
pub fn decode_ulaw_samples(ulaw: &[u8]) -> Vec<i16> {
    ulaw.iter().map(|&code| decode_ulaw(code)).collect()
}

/// Encode samples to A-law into a pre-allocated buffer
///
/// Returns the number of codes written.
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// `samples`.
pub fn encode_alaw_into(samples: &[i16], output: &mut [u8]) -> Result<usize> {
    validate_buffer_sizes(samples.len(), output.len(), 1.0)?;
    for (code, &sample) in output.iter_mut().zip(samples) {
        *code = encode_alaw(sample);
    }
    Ok(samples.len())
}

/// Encode samples to μ-law into a pre-allocated buffer
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// `samples`.
pub fn encode_ulaw_into(samples: &[i16], output: &mut [u8]) -> Result<usize> {
    validate_buffer_sizes(samples.len(), output.len(), 1.0)?;
    for (code, &sample) in output.iter_mut().zip(samples) {
        *code = encode_ulaw(sample);
    }
    Ok(samples.len())
}

/// Decode A-law codes into a pre-allocated sample buffer
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// `encoded`.
pub fn decode_alaw_into(encoded: &[u8], output: &mut [i16]) -> Result<usize> {
    validate_buffer_sizes(encoded.len(), output.len(), 1.0)?;
    for (sample, &code) in output.iter_mut().zip(encoded) {
        *sample = decode_alaw(code);
    }
    Ok(encoded.len())
}

/// Decode μ-law codes into a pre-allocated sample buffer
///
/// # Errors
///
/// Returns [`crate::CodecError::BufferTooSmall`] if `output` is shorter than
/// `encoded`.
pub fn decode_ulaw_into(encoded: &[u8], output: &mut [i16]) -> Result<usize> {
    validate_buffer_sizes(encoded.len(), output.len(), 1.0)?;
    for (sample, &code) in output.iter_mut().zip(encoded) {
        *sample = decode_ulaw(code);
    }
    Ok(encoded.len())
}

impl Conversion {
    /// Apply this conversion to a whole buffer
    ///
    /// A trailing incomplete LPCM sample is dropped, as with the
    /// `*_buffer` functions.
    pub fn convert(self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::EncodeAlaw => encode_alaw_buffer(input),
            Self::EncodeUlaw => encode_ulaw_buffer(input),
            Self::DecodeAlaw => decode_alaw_buffer(input),
            Self::DecodeUlaw => decode_ulaw_buffer(input),
            Self::AlawToUlaw => alaw_to_ulaw_buffer(input),
            Self::UlawToAlaw => ulaw_to_alaw_buffer(input),
        }
    }

    /// Append the conversion of every complete input sample to `output`
    ///
    /// Returns the number of input bytes used; anything past that is an
    /// incomplete sample left for the caller.
    pub fn convert_into(self, input: &[u8], output: &mut BytesMut) -> usize {
        let used = input.len() - input.len() % self.input_unit();
        let input = &input[..used];
        output.reserve(self.output_len(used));

        match self {
            Self::EncodeAlaw => {
                for pair in input.chunks_exact(2) {
                    output.put_u8(encode_alaw(le_sample(pair)));
                }
            }
            Self::EncodeUlaw => {
                for pair in input.chunks_exact(2) {
                    output.put_u8(encode_ulaw(le_sample(pair)));
                }
            }
            Self::DecodeAlaw => {
                for &code in input {
                    output.put_i16_le(decode_alaw(code));
                }
            }
            Self::DecodeUlaw => {
                for &code in input {
                    output.put_i16_le(decode_ulaw(code));
                }
            }
            Self::AlawToUlaw => {
                for &code in input {
                    output.put_u8(alaw_to_ulaw(code));
                }
            }
            Self::UlawToAlaw => {
                for &code in input {
                    output.put_u8(ulaw_to_alaw(code));
                }
            }
        }

        used
    }
}

/// Frame codec for one G.711 law
///
/// G.711 keeps no state between frames, so any frame length is accepted and
/// `reset` has nothing to clear.
#[derive(Debug, Clone)]
pub struct G711Codec {
    codec_type: CodecType,
    frame_size: usize,
}

impl G711Codec {
    /// Create a codec for the given type
    pub fn new(codec_type: CodecType) -> Self {
        Self {
            codec_type,
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }

    /// Create a μ-law (PCMU) codec
    pub fn new_pcmu() -> Self {
        Self::new(CodecType::G711Pcmu)
    }

    /// Create an A-law (PCMA) codec
    pub fn new_pcma() -> Self {
        Self::new(CodecType::G711Pcma)
    }

    /// Set the nominal frame size in samples
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Get the codec type
    pub fn codec_type(&self) -> CodecType {
        self.codec_type
    }
}

impl AudioCodec for G711Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        Ok(match self.codec_type {
            CodecType::G711Pcma => encode_alaw_samples(samples),
            CodecType::G711Pcmu => encode_ulaw_samples(samples),
        })
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        Ok(match self.codec_type {
            CodecType::G711Pcma => decode_alaw_samples(data),
            CodecType::G711Pcmu => decode_ulaw_samples(data),
        })
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: self.codec_type.name(),
            sample_rate: self.codec_type.sample_rate(),
            channels: 1,
            bitrate: self.codec_type.bitrate(),
            frame_size: self.frame_size,
            payload_type: Some(self.codec_type.payload_type()),
        }
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}
