//! G.711 Decoder Unit Tests
//!
//! Tests for G.711 decoding functionality including:
//! - Round-trip error bounds per segment
//! - LPCM byte buffer and sample slice forms
//! - Frame codec decoding

use crate::codecs::g711::reference::{alaw_step, ulaw_step};
use crate::codecs::g711::*;
use crate::error::CodecError;
use crate::types::{AudioCodec, CodecType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_within_one_step() {
        for sample in i16::MIN..=i16::MAX {
            let code = encode_alaw(sample);
            let error = (i32::from(decode_alaw(code)) - i32::from(sample)).abs();
            // A-law decodes to the interval midpoint
            assert!(
                error <= alaw_step(code) / 2,
                "A-law error {} for {}",
                error,
                sample
            );

            let code = encode_ulaw(sample);
            let error = (i32::from(decode_ulaw(code)) - i32::from(sample)).abs();
            assert!(
                error <= ulaw_step(code),
                "μ-law error {} for {}",
                error,
                sample
            );
        }
    }

    #[test]
    fn test_decoded_levels_are_fixed_points() {
        for code in 0u8..=255 {
            let level = decode_alaw(code);
            assert_eq!(decode_alaw(encode_alaw(level)), level);

            let level = decode_ulaw(code);
            assert_eq!(decode_ulaw(encode_ulaw(level)), level);
        }
    }

    #[test]
    fn test_decode_buffer_is_little_endian() {
        assert_eq!(decode_alaw_buffer(&[0xd5, 0xaa]), vec![0x08, 0x00, 0x00, 0x7e]);
        assert_eq!(decode_ulaw_buffer(&[0xff, 0x80]), vec![0x00, 0x00, 0x7c, 0x7d]);
        assert!(decode_alaw_buffer(&[]).is_empty());
        assert!(decode_ulaw_buffer(&[]).is_empty());
    }

    #[test]
    fn test_buffer_matches_samples() {
        let codes: Vec<u8> = (0u8..=255).collect();

        let lpcm: Vec<u8> = decode_alaw_samples(&codes)
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        assert_eq!(decode_alaw_buffer(&codes), lpcm);

        let lpcm: Vec<u8> = decode_ulaw_samples(&codes)
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        assert_eq!(decode_ulaw_buffer(&codes), lpcm);
    }

    #[test]
    fn test_decode_into() {
        let codes = [0xd5u8, 0xaa, 0x55];
        let mut output = vec![0i16; 3];

        assert_eq!(decode_alaw_into(&codes, &mut output).unwrap(), 3);
        assert_eq!(output, vec![8, 32256, -8]);

        assert_eq!(decode_ulaw_into(&codes[..1], &mut output).unwrap(), 1);
        assert_eq!(output[0], decode_ulaw(0xd5));

        let mut short = vec![0i16; 1];
        assert!(matches!(
            decode_ulaw_into(&codes, &mut short),
            Err(CodecError::BufferTooSmall { needed: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_codec_round_trip() {
        for codec_type in [CodecType::G711Pcma, CodecType::G711Pcmu] {
            let mut codec = G711Codec::new(codec_type);
            let samples: Vec<i16> = (0..160).map(|i| ((i * 409) % 20000 - 10000) as i16).collect();

            let encoded = codec.encode(&samples).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded.len(), samples.len());

            for (&original, &restored) in samples.iter().zip(&decoded) {
                assert!(
                    (i32::from(original) - i32::from(restored)).abs() <= 512,
                    "{}: {} decoded as {}",
                    codec_type,
                    original,
                    restored
                );
            }

            assert!(codec.reset().is_ok());
            let info = codec.info();
            assert_eq!(info.sample_rate, 8000);
            assert_eq!(info.channels, 1);
            assert_eq!(info.payload_type, Some(codec_type.payload_type()));
        }
    }
}
