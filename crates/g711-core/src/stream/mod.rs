//! Streaming G.711 adapters
//!
//! [`G711Writer`] converts on the push side: bytes written to it are
//! converted and forwarded to a wrapped [`std::io::Write`] sink.
//! [`G711Reader`] converts on the pull side: it draws from a wrapped
//! [`std::io::Read`] source and hands out converted bytes.
//!
//! Both adapters resolve their [`Conversion`](crate::Conversion) once at
//! construction and accept arbitrary chunk boundaries. When the input is
//! LPCM a chunk may end halfway through a sample; the odd byte is carried
//! into the next call, so chunked and one-shot conversion produce identical
//! output.
//!
//! ## Example
//!
//! ```rust
//! use g711_core::{Format, G711Reader, G711Writer};
//! use std::io::{Read, Write};
//!
//! // Encode two samples to A-law, then decode them back
//! let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Alaw)?;
//! writer.write_all(&[0x00, 0x00, 0xe8, 0x03])?;
//! let alaw = writer.close()?.unwrap_or_default();
//! assert_eq!(alaw, vec![0xd5, 0xfa]);
//!
//! let mut reader = G711Reader::new(&alaw[..], Format::Alaw, Format::Lpcm)?;
//! let mut lpcm = Vec::new();
//! reader.read_to_end(&mut lpcm)?;
//! assert_eq!(lpcm, vec![0x08, 0x00, 0xf0, 0x03]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod reader;
mod writer;

pub use builder::StreamBuilder;
pub use reader::G711Reader;
pub use writer::G711Writer;

use bytes::{Buf, BytesMut};
use std::io::{self, Write};

/// Write all of `pending` to `sink`, draining it as the sink accepts bytes
///
/// On error the bytes the sink did not take stay in `pending`.
/// `Interrupted` is returned to the caller like any other error.
pub(crate) fn deliver<W: Write>(sink: &mut W, pending: &mut BytesMut) -> io::Result<()> {
    while !pending.is_empty() {
        let written = sink.write(&pending[..])?;
        if written == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "sink accepted no converted bytes",
            ));
        }
        pending.advance(written);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink accepting at most `limit` bytes per call
    struct Trickle {
        data: Vec<u8>,
        limit: usize,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_deliver_drains_through_short_writes() {
        let mut sink = Trickle {
            data: Vec::new(),
            limit: 3,
        };
        let mut pending = BytesMut::from(&[1u8, 2, 3, 4, 5, 6, 7][..]);

        deliver(&mut sink, &mut pending).unwrap();
        assert!(pending.is_empty());
        assert_eq!(sink.data, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_deliver_zero_write_keeps_pending() {
        let mut sink = Trickle {
            data: Vec::new(),
            limit: 0,
        };
        let mut pending = BytesMut::from(&[9u8, 9][..]);

        let err = deliver(&mut sink, &mut pending).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(pending.len(), 2);
    }
}
