//! Input validation utilities for codec operations

use crate::error::{CodecError, Result};
use crate::types::Conversion;

/// Validate buffer sizes for encoding/decoding operations
///
/// `expected_ratio` is the number of output elements needed per input
/// element.
pub fn validate_buffer_sizes(
    input_size: usize,
    output_size: usize,
    expected_ratio: f64,
) -> Result<()> {
    let expected_output_size = (input_size as f64 * expected_ratio) as usize;

    if output_size < expected_output_size {
        return Err(CodecError::BufferTooSmall {
            needed: expected_output_size,
            actual: output_size,
        });
    }

    Ok(())
}

/// Check that an LPCM byte buffer holds only whole samples
pub fn is_sample_aligned(conversion: Conversion, len: usize) -> bool {
    len % conversion.input_unit() == 0
}
