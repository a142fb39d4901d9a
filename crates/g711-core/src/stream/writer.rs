//! Push-side streaming adapter

use super::deliver;
use crate::error::{CodecError, Result};
use crate::types::{Conversion, Format};
use bytes::BytesMut;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// Converts bytes written to it and forwards the result to a sink
///
/// Chunks may split an LPCM sample anywhere: the odd byte is held and
/// completed by the next call, so the sink sees exactly what converting the
/// concatenated stream in one go would produce.
///
/// ```rust
/// use g711_core::{Format, G711Writer};
///
/// let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Alaw)?;
/// assert_eq!(writer.write(&[0x01, 0x00, 0x7c])?, 3);
/// assert_eq!(writer.write(&[0x7f])?, 1);
/// assert_eq!(writer.get_ref(), Some(&vec![0xd5, 0xaa]));
/// # Ok::<(), g711_core::CodecError>(())
/// ```
#[derive(Debug)]
pub struct G711Writer<W: Write> {
    sink: Option<W>,
    conversion: Conversion,
    carry: Option<u8>,
    pending: BytesMut,
}

impl<W: Write> G711Writer<W> {
    /// Create a writer converting `input` to `output`
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair.
    pub fn new(sink: W, input: Format, output: Format) -> Result<Self> {
        Ok(Self::with_conversion(sink, Conversion::resolve(input, output)?))
    }

    /// Create a writer for an already resolved conversion
    pub fn with_conversion(sink: W, conversion: Conversion) -> Self {
        Self::with_capacity(sink, conversion, 0)
    }

    pub(crate) fn with_capacity(sink: W, conversion: Conversion, capacity: usize) -> Self {
        debug!(%conversion, ratio = conversion.ratio(), "G.711 writer created");
        Self {
            sink: Some(sink),
            conversion,
            carry: None,
            pending: BytesMut::with_capacity(capacity),
        }
    }

    /// The conversion this writer applies
    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Check if the writer has been closed
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Number of input bytes held back as an incomplete sample (0 or 1)
    pub fn carried(&self) -> usize {
        usize::from(self.carry.is_some())
    }

    /// Number of converted bytes the sink has not accepted yet
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Get a reference to the sink, or `None` once closed
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Get a mutable reference to the sink, or `None` once closed
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.sink.as_mut()
    }

    /// Convert `buf` and write the result to the sink
    ///
    /// Returns how many bytes of `buf` the writer took. A call that
    /// completes at least one sample takes all of `buf`, including an odd
    /// trailing LPCM byte it holds for the next call, so chunking never
    /// changes the total. A call that completes no sample reports 0 even
    /// though it holds the byte: writing `[0x01]` returns 0, and the byte
    /// must not be written again.
    ///
    /// Once input is taken it is never handed back. If the sink fails after
    /// this call's input was converted, the output stays buffered and the
    /// error is reported by the next `write` or `flush`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AdapterClosed`] after [`close`](Self::close),
    /// or the sink's error unchanged when output buffered by an earlier
    /// call still cannot be delivered. Nothing of `buf` is taken then.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.is_closed() {
            return Err(CodecError::AdapterClosed);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        self.deliver()?;
        let consumed = self.stage(buf);
        if let Err(err) = self.deliver() {
            debug!(%err, buffered = self.pending.len(), "G.711 sink write deferred");
        }

        trace!(
            len = buf.len(),
            consumed,
            carried = self.carried(),
            "G.711 write"
        );
        Ok(consumed)
    }

    /// Write any buffered output and flush the sink
    ///
    /// A held half sample is not flushed; it has no encoding on its own.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AdapterClosed`] after [`close`](Self::close),
    /// or the sink's error unchanged.
    pub fn flush(&mut self) -> Result<()> {
        self.deliver()?;
        let sink = self.sink.as_mut().ok_or(CodecError::AdapterClosed)?;
        sink.flush()?;
        Ok(())
    }

    /// Swap in a new sink, discarding buffered output and any held byte
    ///
    /// The resolved conversion is kept. Returns the previous sink.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AdapterClosed`] after [`close`](Self::close).
    pub fn reset(&mut self, sink: W) -> Result<W> {
        if self.is_closed() {
            return Err(CodecError::AdapterClosed);
        }
        let previous = self.sink.replace(sink).ok_or(CodecError::AdapterClosed)?;

        self.pending.clear();
        self.carry = None;
        debug!(conversion = %self.conversion, "G.711 writer reset");
        Ok(previous)
    }

    /// Deliver buffered output, flush and release the sink
    ///
    /// A held half sample is dropped. Closing twice is a no-op that
    /// returns `Ok(None)`; every other call on a closed writer fails with
    /// [`CodecError::AdapterClosed`]. The writer is closed even when
    /// delivering the last output fails.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unchanged.
    pub fn close(&mut self) -> Result<Option<W>> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(None);
        };

        let delivered = deliver(&mut sink, &mut self.pending);
        self.pending.clear();
        if let Some(byte) = self.carry.take() {
            warn!(byte, "G.711 writer closed with an unpaired LPCM byte, discarding it");
        }
        debug!(conversion = %self.conversion, "G.711 writer closed");

        delivered?;
        sink.flush()?;
        Ok(Some(sink))
    }

    /// Convert every complete sample of `carry + buf` into `pending`
    ///
    /// Returns the bytes of `buf` now converted or held, or 0 when no
    /// sample was completed.
    fn stage(&mut self, buf: &[u8]) -> usize {
        let before = self.pending.len();
        let carried_in = self.carried();

        let mut input = buf;
        if let Some(first) = self.carry.take() {
            // Only LPCM input carries, so one byte from buf completes the sample
            self.conversion.convert_into(&[first, buf[0]], &mut self.pending);
            input = &buf[1..];
        }

        let used = self.conversion.convert_into(input, &mut self.pending);
        if used < input.len() {
            self.carry = Some(input[used]);
        }

        let produced = self.pending.len() - before;
        if produced == 0 {
            return 0;
        }
        let taken = produced / self.conversion.output_unit() * self.conversion.input_unit()
            + self.carried()
            - carried_in;
        debug_assert_eq!(taken, buf.len());
        taken
    }

    fn deliver(&mut self) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(CodecError::AdapterClosed)?;
        deliver(sink, &mut self.pending)?;
        Ok(())
    }
}

impl<W: Write> Write for G711Writer<W> {
    /// Reports the whole buffer as accepted
    ///
    /// A lone LPCM byte belongs to the writer once passed in, so
    /// `write_all` and `io::copy` never resubmit it.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        G711Writer::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        G711Writer::flush(self).map_err(Into::into)
    }
}

impl<W: Write> Drop for G711Writer<W> {
    /// Best-effort delivery of buffered output, like `BufWriter`
    ///
    /// Errors are logged and dropped. The sink is not flushed and a held
    /// half sample is discarded; use [`close`](G711Writer::close) to see
    /// failures.
    fn drop(&mut self) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if self.pending.is_empty() {
            return;
        }
        if let Err(err) = deliver(sink, &mut self.pending) {
            debug!(
                %err,
                lost = self.pending.len(),
                "G.711 writer dropped with undelivered output"
            );
        }
    }
}
