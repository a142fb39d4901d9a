//! Streaming adapter integration tests
//!
//! Exercises `G711Writer` and `G711Reader` through the public API with
//! chunked input, failing endpoints and the `std::io` plumbing.

use g711_core::codecs::g711::{alaw_to_ulaw_buffer, encode_alaw_buffer, encode_ulaw_buffer};
use g711_core::{CodecError, CodecFactory, Conversion, Format, G711Reader, G711Writer};
use std::io::{self, Read, Write};

const LPCM_13: [u8; 13] = [
    0x01, 0x00, 0x7c, 0x7f, 0xd1, 0xd0, 0xd3, 0xd2, 0xdd, 0xdc, 0xdf, 0xde, 0xd9,
];
const ALAW_6: [u8; 6] = [0xd5, 0xaa, 0x32, 0x33, 0x34, 0x35];
const ULAW_6: [u8; 6] = [0xff, 0x80, 0x18, 0x19, 0x1e, 0x1f];

/// Sink that records every call and can be told to fail
#[derive(Debug, Default)]
struct RecordingSink {
    data: Vec<u8>,
    calls: usize,
    failing: bool,
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.failing {
            return Err(io::Error::new(io::ErrorKind::Other, "sink unavailable"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.calls += 1;
        if self.failing {
            return Err(io::Error::new(io::ErrorKind::Other, "sink unavailable"));
        }
        Ok(())
    }
}

/// Source that fails every other read and hands out at most `limit` bytes
struct FlakySource {
    data: Vec<u8>,
    position: usize,
    limit: usize,
    reads: usize,
}

impl FlakySource {
    fn new(data: &[u8], limit: usize) -> Self {
        Self {
            data: data.to_vec(),
            position: 0,
            limit,
            reads: 0,
        }
    }
}

impl Read for FlakySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.reads % 2 == 1 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "flaky source"));
        }
        let remaining = &self.data[self.position..];
        let n = buf.len().min(self.limit).min(remaining.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

#[test]
fn test_chunked_encoding_matches_one_shot() {
    for (output, expected) in [(Format::Alaw, ALAW_6), (Format::Ulaw, ULAW_6)] {
        let mut chunked = G711Writer::new(Vec::new(), Format::Lpcm, output).unwrap();
        assert_eq!(chunked.write(&LPCM_13[..6]).unwrap(), 6);
        assert_eq!(chunked.write(&LPCM_13[6..12]).unwrap(), 6);
        assert_eq!(chunked.write(&LPCM_13[12..]).unwrap(), 0);
        assert_eq!(chunked.carried(), 1);

        let mut whole = G711Writer::new(Vec::new(), Format::Lpcm, output).unwrap();
        assert_eq!(whole.write(&LPCM_13).unwrap(), 13);
        assert_eq!(whole.carried(), 1);

        assert_eq!(chunked.get_ref().unwrap(), &expected);
        assert_eq!(whole.get_ref().unwrap(), &expected);
    }
}

#[test]
fn test_write_byte_accounting() {
    let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Alaw).unwrap();

    assert_eq!(writer.write(&[]).unwrap(), 0);
    assert_eq!(writer.carried(), 0);

    assert_eq!(writer.write(&[0x01]).unwrap(), 0);
    assert_eq!(writer.carried(), 1);
    assert!(writer.get_ref().unwrap().is_empty());

    assert_eq!(writer.write(&[0x00]).unwrap(), 1);
    assert_eq!(writer.carried(), 0);
    assert_eq!(writer.get_ref().unwrap(), &vec![0xd5]);

    assert_eq!(writer.write(&[0x01, 0x00]).unwrap(), 2);
    assert_eq!(writer.write(&[0x00, 0x00, 0x00]).unwrap(), 3);
    assert_eq!(writer.carried(), 1);

    // The held byte was counted when it was taken
    assert_eq!(writer.write(&[0x00, 0x00]).unwrap(), 2);
    assert_eq!(writer.carried(), 1);
    assert_eq!(writer.get_ref().unwrap().len(), 4);
}

#[test]
fn test_write_totals_do_not_depend_on_chunking() {
    let data = [0u8; 8];
    let splits: [&[usize]; 4] = [&[8], &[7, 1], &[3, 3, 2], &[5, 2, 1]];

    for split in splits {
        let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Alaw).unwrap();
        let mut rest = &data[..];
        let mut total = 0;
        for &size in split {
            let (chunk, tail) = rest.split_at(size);
            let taken = writer.write(chunk).unwrap();
            assert!(taken <= chunk.len());
            total += taken;
            rest = tail;
        }

        assert_eq!(total + writer.carried(), data.len(), "split {:?}", split);
        assert_eq!(writer.get_ref().unwrap(), &vec![0xd5; 4]);
    }
}

#[test]
fn test_companded_input_maps_every_byte() {
    let mut writer = G711Writer::new(Vec::new(), Format::Alaw, Format::Ulaw).unwrap();
    assert_eq!(writer.write(&LPCM_13).unwrap(), 13);
    assert_eq!(writer.carried(), 0);
    assert_eq!(writer.get_ref().unwrap(), &alaw_to_ulaw_buffer(&LPCM_13));

    let mut writer = G711Writer::new(Vec::new(), Format::Ulaw, Format::Lpcm).unwrap();
    assert_eq!(writer.write(&LPCM_13).unwrap(), 13);
    assert_eq!(writer.get_ref().unwrap().len(), 26);
}

#[test]
fn test_io_write_accepts_carried_byte() {
    let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Ulaw).unwrap();

    // write_all must not resubmit the odd byte
    Write::write_all(&mut writer, &LPCM_13).unwrap();
    assert_eq!(Write::write(&mut writer, &[0x01]).unwrap(), 1);
    assert_eq!(writer.carried(), 0);
    Write::flush(&mut writer).unwrap();

    let mut expected = ULAW_6.to_vec();
    expected.extend(encode_ulaw_buffer(&[0xd9, 0x01]));
    assert_eq!(writer.get_ref().unwrap(), &expected);
}

#[test]
fn test_closed_writer_performs_no_io() {
    let mut writer = G711Writer::new(RecordingSink::default(), Format::Lpcm, Format::Alaw).unwrap();
    writer.write(&[0x01, 0x00, 0x7c]).unwrap();

    let sink = writer.close().unwrap().unwrap();
    assert_eq!(sink.data, vec![0xd5]);
    assert!(writer.is_closed());
    assert_eq!(writer.carried(), 0);

    assert!(matches!(writer.write(&[0x00]), Err(CodecError::AdapterClosed)));
    assert!(matches!(writer.write(&[]), Err(CodecError::AdapterClosed)));
    assert!(matches!(writer.flush(), Err(CodecError::AdapterClosed)));
    assert!(matches!(
        writer.reset(RecordingSink::default()),
        Err(CodecError::AdapterClosed)
    ));
    assert!(writer.close().unwrap().is_none());

    let err = Write::write(&mut writer, &[0x00]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn test_writer_reset_returns_previous_sink() {
    let mut writer = G711Writer::new(Vec::new(), Format::Lpcm, Format::Alaw).unwrap();
    writer.write(&[0x01, 0x00, 0x7c]).unwrap();

    let previous = writer.reset(Vec::new()).unwrap();
    assert_eq!(previous, vec![0xd5]);
    assert_eq!(writer.carried(), 0);
    assert_eq!(writer.conversion(), Conversion::EncodeAlaw);

    // The discarded half sample does not leak into the new stream
    assert_eq!(writer.write(&[0x00, 0x00]).unwrap(), 2);
    assert_eq!(writer.get_ref().unwrap(), &vec![0xd5]);
}

#[test]
fn test_failing_sink_keeps_output_buffered() {
    let sink = RecordingSink {
        failing: true,
        ..RecordingSink::default()
    };
    let mut writer = G711Writer::new(sink, Format::Lpcm, Format::Alaw).unwrap();

    // The input is taken and the failure waits for the next call
    assert_eq!(writer.write(&[0x01, 0x00, 0x7c, 0x7f]).unwrap(), 4);
    assert_eq!(writer.buffered(), 2);

    match writer.write(&[0x00, 0x00]) {
        Err(CodecError::Io(err)) => assert_eq!(err.to_string(), "sink unavailable"),
        other => panic!("expected sink error, got {:?}", other),
    }
    assert_eq!(writer.buffered(), 2);
    assert_eq!(writer.carried(), 0);
    assert!(writer.flush().is_err());

    writer.get_mut().unwrap().failing = false;
    writer.flush().unwrap();
    assert_eq!(writer.buffered(), 0);
    assert_eq!(writer.get_ref().unwrap().data, vec![0xd5, 0xaa]);
}

#[test]
fn test_io_write_defers_sink_error() {
    let mut writer = G711Writer::new(RecordingSink::default(), Format::Lpcm, Format::Alaw).unwrap();
    writer.get_mut().unwrap().failing = true;

    assert_eq!(Write::write(&mut writer, &[0x01, 0x00]).unwrap(), 2);
    assert_eq!(writer.buffered(), 1);

    // The next call reports the error before taking more input
    assert!(Write::write(&mut writer, &[0x7c, 0x7f]).is_err());
    assert_eq!(writer.buffered(), 1);

    writer.get_mut().unwrap().failing = false;
    assert_eq!(Write::write(&mut writer, &[0x7c, 0x7f]).unwrap(), 2);
    assert_eq!(writer.get_ref().unwrap().data, vec![0xd5, 0xaa]);
}

#[test]
fn test_drop_delivers_buffered_output() {
    let mut sink = RecordingSink {
        failing: true,
        ..RecordingSink::default()
    };

    {
        let mut writer = G711Writer::new(&mut sink, Format::Lpcm, Format::Alaw).unwrap();
        assert_eq!(writer.write(&[0x01, 0x00, 0x7c, 0x7f, 0x00]).unwrap(), 5);
        assert_eq!(writer.buffered(), 2);
        writer.get_mut().unwrap().failing = false;
    }

    assert_eq!(sink.data, vec![0xd5, 0xaa]);
}

#[test]
fn test_drop_with_failing_sink_does_not_panic() {
    let sink = RecordingSink {
        failing: true,
        ..RecordingSink::default()
    };
    let mut writer = G711Writer::new(sink, Format::Lpcm, Format::Ulaw).unwrap();
    writer.write(&[0x01, 0x00]).unwrap();
    assert_eq!(writer.buffered(), 1);
    drop(writer);
}

#[test]
fn test_flaky_source_resumes_without_loss() {
    let lpcm: Vec<u8> = (0..301u32).map(|i| (i * 37 % 256) as u8).collect();
    let mut reader = G711Reader::new(FlakySource::new(&lpcm, 3), Format::Lpcm, Format::Alaw).unwrap();

    let mut output = Vec::new();
    let mut errors = 0;
    let mut buf = [0u8; 5];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => output.extend_from_slice(&buf[..n]),
            Err(CodecError::Io(err)) => {
                assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
                errors += 1;
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert!(errors > 0);
    assert_eq!(output, encode_alaw_buffer(&lpcm));
    assert_eq!(reader.carried(), 1);
}

#[test]
fn test_reader_odd_buffers_split_decoded_samples() {
    let alaw: &[u8] = &ALAW_6;
    let mut reader = G711Reader::new(alaw, Format::Alaw, Format::Lpcm).unwrap();

    let mut output = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        output.extend_from_slice(&buf[..n]);
    }

    assert_eq!(output, Conversion::DecodeAlaw.convert(&ALAW_6));
    assert_eq!(reader.buffered(), 0);
}

#[test]
fn test_closed_reader_performs_no_io() {
    let mut reader = G711Reader::new(FlakySource::new(&[0xd5], 1), Format::Alaw, Format::Ulaw).unwrap();
    let source = reader.close().unwrap();
    assert_eq!(source.reads, 0);

    assert!(matches!(reader.read(&mut [0u8; 4]), Err(CodecError::AdapterClosed)));
    assert!(matches!(
        reader.reset(FlakySource::new(&[], 1)),
        Err(CodecError::AdapterClosed)
    ));
    assert!(reader.close().is_none());
}

#[test]
fn test_io_copy_chains_reader_into_writer() {
    let alaw: Vec<u8> = (0u8..=255).collect();
    let mut reader = CodecFactory::reader(&alaw[..], Format::Alaw, Format::Lpcm).unwrap();
    let mut writer = CodecFactory::writer(Vec::new(), Format::Lpcm, Format::Ulaw).unwrap();

    let copied = io::copy(&mut reader, &mut writer).unwrap();
    assert_eq!(copied, 512);

    let ulaw = writer.close().unwrap().unwrap();
    assert_eq!(ulaw, alaw_to_ulaw_buffer(&alaw));
}
