//! Builder for streaming adapters

use super::{G711Reader, G711Writer};
use crate::error::{CodecError, Result};
use crate::types::{Conversion, Format};
use std::io::{Read, Write};

/// Builder for [`G711Writer`] and [`G711Reader`]
///
/// ```rust
/// use g711_core::{Format, StreamBuilder};
///
/// let writer = StreamBuilder::new(Format::Alaw, Format::Ulaw)
///     .with_sink(Vec::new())
///     .with_capacity(320)
///     .build_writer()?;
/// assert_eq!(writer.conversion().to_string(), "alaw -> ulaw");
/// # Ok::<(), g711_core::CodecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StreamBuilder<T> {
    input: Format,
    output: Format,
    endpoint: Option<T>,
    capacity: usize,
}

impl<T> StreamBuilder<T> {
    /// Start a builder for converting `input` to `output`
    pub fn new(input: Format, output: Format) -> Self {
        Self {
            input,
            output,
            endpoint: None,
            capacity: 0,
        }
    }

    /// Set the sink a writer forwards converted bytes to
    pub fn with_sink(mut self, sink: T) -> Self {
        self.endpoint = Some(sink);
        self
    }

    /// Set the source a reader draws bytes from
    pub fn with_source(mut self, source: T) -> Self {
        self.endpoint = Some(source);
        self
    }

    /// Pre-allocate this many bytes of internal buffering
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    fn parts(self, endpoint: &'static str) -> Result<(T, Conversion, usize)> {
        let conversion = Conversion::resolve(self.input, self.output)?;
        let endpoint = self
            .endpoint
            .ok_or_else(|| CodecError::missing_endpoint(endpoint))?;
        Ok((endpoint, conversion, self.capacity))
    }
}

impl<T: Write> StreamBuilder<T> {
    /// Build a writer
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair and
    /// [`CodecError::MissingEndpoint`] when no sink was set.
    pub fn build_writer(self) -> Result<G711Writer<T>> {
        let (sink, conversion, capacity) = self.parts("sink")?;
        Ok(G711Writer::with_capacity(sink, conversion, capacity))
    }
}

impl<T: Read> StreamBuilder<T> {
    /// Build a reader
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormatPair`] for an identity pair and
    /// [`CodecError::MissingEndpoint`] when no source was set.
    pub fn build_reader(self) -> Result<G711Reader<T>> {
        let (source, conversion, capacity) = self.parts("source")?;
        Ok(G711Reader::with_capacity(source, conversion, capacity))
    }
}
