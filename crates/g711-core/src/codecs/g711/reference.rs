//! G.711 companding algorithms
//!
//! Bit-level A-law and μ-law compression as specified in ITU-T
//! Recommendation G.711, plus the closed-form expansions the lookup tables in
//! [`super::tables`] are checked against.
//!
//! ## Algorithm Details
//!
//! ### A-law Compression
//! - Uses the 12 most significant magnitude bits of the input
//! - Applies 1's complement for negative values
//! - Segment number comes from the position of the leading one bit
//! - Toggles even bits (XOR with 0x55)
//!
//! ### μ-law Compression
//! - Uses the 14 most significant bits of the input
//! - Adds a bias of 33 (0x21) and clips at 0x1FFF
//! - Segment and mantissa are stored inverted

/// Bias added to the magnitude before μ-law segment search
pub const ULAW_BIAS: i16 = 33;

/// Largest biased magnitude μ-law can represent
pub const ULAW_CLIP: i16 = 0x1FFF;

/// Even-bit inversion mask applied to every A-law code
pub const ALAW_AMI_MASK: u8 = 0x55;

/// A-law compression according to ITU-T G.711
///
/// Compresses a 16-bit linear PCM sample to an 8-bit A-law code.
///
/// Negative samples are one's-complemented rather than negated so that the
/// magnitude path handles `i16::MIN` without overflow.
pub fn alaw_compress(sample: i16) -> u8 {
    let sign = ((!sample) >> 8) & 0x80;
    let magnitude = if sign == 0 { !sample } else { sample };

    let mut code = magnitude >> 4;
    if code > 15 {
        let segment = 12 - (code as u16).leading_zeros() as i16;
        code >>= segment - 1;
        code -= 16;
        code += segment << 4;
    }

    ((sign | code) as u8) ^ ALAW_AMI_MASK
}

/// μ-law compression according to ITU-T G.711
///
/// Compresses a 16-bit linear PCM sample to an 8-bit μ-law code.
pub fn ulaw_compress(sample: i16) -> u8 {
    let sign = ((!sample) >> 8) & 0x80;
    let magnitude = if sign == 0 { !sample } else { sample };

    let biased = ((magnitude >> 2) + ULAW_BIAS).min(ULAW_CLIP);
    let segment = 16 - ((biased >> 5) as u16).leading_zeros() as i16;
    let mantissa = 0x0F - ((biased >> segment) & 0x0F);

    (sign | ((8 - segment) << 4) | mantissa) as u8
}

/// A-law expansion according to ITU-T G.711
///
/// Expands an 8-bit A-law code to the midpoint of its quantization interval.
pub fn alaw_expand(compressed: u8) -> i16 {
    let ix = ((compressed ^ ALAW_AMI_MASK) & 0x7F) as i16;
    let exponent = ix >> 4;
    let mut mantissa = ix & 0x0F;

    if exponent > 0 {
        mantissa += 16;
    }

    mantissa = (mantissa << 4) + 0x0008;

    if exponent > 1 {
        mantissa <<= exponent - 1;
    }

    if compressed > 127 {
        mantissa
    } else {
        -mantissa
    }
}

/// μ-law expansion according to ITU-T G.711
///
/// Expands an 8-bit μ-law code to the midpoint of its quantization interval.
pub fn ulaw_expand(compressed: u8) -> i16 {
    let sign = if compressed < 0x80 { -1 } else { 1 };
    let inverted = (!compressed) as i16;
    let exponent = (inverted >> 4) & 0x0007;
    let mantissa = inverted & 0x000F;
    let step = 4 << (exponent + 1);

    sign * ((0x0080 << exponent) + step * mantissa + step / 2 - 4 * ULAW_BIAS)
}

/// Quantization step of the A-law segment a code belongs to
///
/// Segments 0 and 1 share the finest step of 16.
pub fn alaw_step(code: u8) -> i32 {
    let segment = ((code ^ ALAW_AMI_MASK) >> 4) & 0x07;
    16 << segment.saturating_sub(1)
}

/// Quantization step of the μ-law segment a code belongs to
pub fn ulaw_step(code: u8) -> i32 {
    let segment = ((!code) >> 4) & 0x07;
    8 << segment
}
