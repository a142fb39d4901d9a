//! Pull-side streaming adapter

use crate::error::{CodecError, Result};
use crate::types::{Conversion, Format};
use bytes::{Buf, BytesMut};
use std::io::{self, Read};
use tracing::{debug, trace};

/// Reads from a source and hands out converted bytes
///
/// Source reads may end halfway through an LPCM sample; the odd byte is kept
/// and completed by the next source read. Converted output that does not fit
/// the caller's buffer stays buffered for the next call.
///
/// ```rust
/// use g711_core::{Format, G711Reader};
///
/// let source: &[u8] = &[0xd5, 0xaa];
/// let mut reader = G711Reader::new(source, Format::Alaw, Format::Lpcm)?;
///
/// // An odd-sized buffer splits the first decoded sample
/// let mut buf = [0u8; 3];
/// assert_eq!(reader.read(&mut buf)?, 3);
/// assert_eq!(buf, [0x08, 0x00, 0x00]);
/// assert_eq!(reader.read(&mut buf)?, 1);
/// assert_eq!(buf[0], 0x7e);
/// assert_eq!(reader.read(&mut buf)?, 0);
/// # Ok::<(), g711_core::CodecError>(())
/// ```
#[derive(Debug)]
pub struct G711Reader<R: Read> {
    source: Option<R>,
    conversion: Conversion,
    carry: Option<u8>,
    scratch: Vec<u8>,
    pending: BytesMut,
}

impl<R: Read> G711Reader<R> {
    /// Create a reader converting `input` to `output`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair.
    pub fn new(source: R, input: Format, output: Format) -> Result<Self> {
        Ok(Self::with_conversion(source, Conversion::resolve(input, output)?))
    }

    /// Create a reader for an already resolved conversion
    pub fn with_conversion(source: R, conversion: Conversion) -> Self {
        Self::with_capacity(source, conversion, 0)
    }

    pub(crate) fn with_capacity(source: R, conversion: Conversion, capacity: usize) -> Self {
        debug!(%conversion, ratio = conversion.ratio(), "G.711 reader created");
        Self {
            source: Some(source),
            conversion,
            carry: None,
            scratch: Vec::with_capacity(capacity),
            pending: BytesMut::with_capacity(capacity),
        }
    }

    /// The conversion this reader applies
    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Check if the reader has been closed
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Number of source bytes held back as an incomplete sample (0 or 1)
    pub fn carried(&self) -> usize {
        usize::from(self.carry.is_some())
    }

    /// Number of converted bytes waiting to be read
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Get a reference to the source, or `None` once closed
    pub fn get_ref(&self) -> Option<&R> {
        self.source.as_ref()
    }

    /// Get a mutable reference to the source, or `None` once closed
    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.source.as_mut()
    }

    /// Fill `buf` with converted bytes
    ///
    /// Reads from the source only when nothing converted is buffered.
    /// Returns 0 at end of source. A half LPCM sample left at end of source
    /// is not converted.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AdapterClosed`] after [`close`](Self::close),
    /// or the source's error unchanged. A failed source read loses nothing:
    /// the next call picks up where this one stopped.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.is_closed() {
            return Err(CodecError::AdapterClosed);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pending.is_empty() {
            if !self.fill(buf.len())? {
                trace!(carried = self.carried(), "G.711 read reached end of source");
                return Ok(0);
            }
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.advance(n);

        trace!(
            len = buf.len(),
            produced = n,
            buffered = self.pending.len(),
            carried = self.carried(),
            "G.711 read"
        );
        Ok(n)
    }

    /// Swap in a new source, discarding buffered output and any held byte
    ///
    /// The resolved conversion is kept. Returns the previous source.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AdapterClosed`] after [`close`](Self::close).
    pub fn reset(&mut self, source: R) -> Result<R> {
        if self.is_closed() {
            return Err(CodecError::AdapterClosed);
        }
        let previous = self.source.replace(source).ok_or(CodecError::AdapterClosed)?;

        self.pending.clear();
        self.carry = None;
        debug!(conversion = %self.conversion, "G.711 reader reset");
        Ok(previous)
    }

    /// Release the source, discarding buffered output
    ///
    /// Returns `None` when already closed. Every later read or reset fails
    /// with [`CodecError::AdapterClosed`].
    pub fn close(&mut self) -> Option<R> {
        let source = self.source.take()?;
        debug!(
            conversion = %self.conversion,
            discarded = self.pending.len() + self.carried(),
            "G.711 reader closed"
        );
        self.pending.clear();
        self.carry = None;
        Some(source)
    }

    /// Read once from the source and convert what arrived into `pending`
    ///
    /// Returns `false` at end of source.
    fn fill(&mut self, wanted: usize) -> Result<bool> {
        let source = self.source.as_mut().ok_or(CodecError::AdapterClosed)?;

        // The held byte goes first so the source read completes its sample
        let offset = usize::from(self.carry.is_some());
        let len = self.conversion.input_len(wanted).max(offset + 1);
        self.scratch.resize(len, 0);
        if let Some(first) = self.carry {
            self.scratch[0] = first;
        }

        let read = source.read(&mut self.scratch[offset..])?;
        if read == 0 {
            return Ok(false);
        }

        let total = offset + read;
        self.carry = None;
        let used = self
            .conversion
            .convert_into(&self.scratch[..total], &mut self.pending);
        if used < total {
            self.carry = Some(self.scratch[used]);
        }
        Ok(true)
    }
}

impl<R: Read> Read for G711Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        G711Reader::read(self, buf).map_err(Into::into)
    }
}
