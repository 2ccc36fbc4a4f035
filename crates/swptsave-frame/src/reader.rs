use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{decode_property, CodecConfig, Property};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete properties from any `Read` stream.
///
/// The property list has no count; a clean end of stream between two
/// properties ends it.
pub struct PropertyReader<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
    offset: u64,
    failed: bool,
}

impl<T: Read> PropertyReader<T> {
    /// Create a new property reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new property reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            offset: 0,
            failed: false,
        }
    }

    /// Read the next complete property (blocking).
    ///
    /// Returns `Ok(None)` at end of stream, and `Err(FrameError::Truncated)`
    /// if the stream ends inside a property.
    pub fn read_property(&mut self) -> Result<Option<Property>> {
        loop {
            let before = self.buf.len();
            if let Some(property) = decode_property(&mut self.buf, &self.config)? {
                let consumed = (before - self.buf.len()) as u64;
                trace!(
                    offset = self.offset,
                    size = consumed,
                    name = %property.name,
                    kind = ?property.kind(),
                    "decoded property"
                );
                self.offset += consumed;
                return Ok(Some(property));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(FrameError::Truncated {
                    buffered: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read properties until end of stream.
    pub fn read_all(&mut self) -> Result<Vec<Property>> {
        let mut properties = Vec::new();
        while let Some(property) = self.read_property()? {
            properties.push(property);
        }
        Ok(properties)
    }

    /// Stream offset of the next undecoded property.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current property reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<T: Read> Iterator for PropertyReader<T> {
    type Item = Result<Property>;

    /// Stops after the first error; the stream position is undefined then.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.read_property().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use swptsave_types::{ArrayValue, Value, ValueKind};

    use super::*;
    use crate::codec::{encode_property, PROPERTY_PREFIX};

    fn wire(properties: &[Property]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for p in properties {
            encode_property(p, &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn read_single_property() {
        let bytes = wire(&[Property::new("hello", Value::Int32(7))]);
        let mut reader = PropertyReader::new(Cursor::new(bytes));

        let property = reader.read_property().unwrap().unwrap();
        assert_eq!(property.name, "hello");
        assert_eq!(property.value, Value::Int32(7));
        assert!(reader.read_property().unwrap().is_none());
    }

    #[test]
    fn read_all_preserves_order_and_duplicates() {
        let props = vec![
            Property::new("one", Value::Bool(true)),
            Property::new("two", Value::String("2".into())),
            Property::new("one", Value::Single(3.0)),
        ];
        let mut reader = PropertyReader::new(Cursor::new(wire(&props)));
        assert_eq!(reader.read_all().unwrap(), props);
        assert_eq!(reader.offset(), wire(&props).len() as u64);
    }

    #[test]
    fn empty_stream_has_no_properties() {
        let mut reader = PropertyReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.read_property().unwrap().is_none());
    }

    #[test]
    fn large_array_spans_many_reads() {
        let items = (0..20_000).map(Value::Int32).collect();
        let array = ArrayValue::with_items(ValueKind::Int32, items).unwrap();
        let props = vec![Property::new("big", Value::Array(array))];
        let bytes = wire(&props);
        assert!(bytes.len() > READ_CHUNK_SIZE * 4);

        let mut reader = PropertyReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_all().unwrap(), props);
    }

    #[test]
    fn partial_read_handling() {
        let bytes = wire(&[Property::new("slow", Value::Int32(4))]);
        let mut reader = PropertyReader::new(ByteByByteReader { bytes, pos: 0 });

        let property = reader.read_property().unwrap().unwrap();
        assert_eq!(property.value, Value::Int32(4));
    }

    #[test]
    fn stream_ends_mid_property() {
        let mut bytes = wire(&[Property::new("cut", Value::Int32(1))]);
        bytes.truncate(bytes.len() - 1);
        let mut reader = PropertyReader::new(Cursor::new(bytes));
        let err = reader.read_property().unwrap_err();
        assert!(matches!(err, FrameError::Truncated { .. }));
        assert!(err.is_format());
    }

    #[test]
    fn garbage_is_rejected_immediately() {
        let mut reader = PropertyReader::new(Cursor::new(vec![0x00, 0x01, 0x02]));
        assert!(matches!(
            reader.read_property(),
            Err(FrameError::UnexpectedByte { found: 0x00, .. })
        ));
    }

    #[test]
    fn iterator_yields_results() {
        let props = vec![
            Property::new("a", Value::Int32(1)),
            Property::new("b", Value::Int32(2)),
        ];
        let mut bytes = wire(&props);
        bytes.push(PROPERTY_PREFIX);

        let results: Vec<_> = PropertyReader::new(Cursor::new(bytes)).collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &props[0]);
        assert_eq!(results[1].as_ref().unwrap(), &props[1]);
        assert!(matches!(results[2], Err(FrameError::Truncated { buffered: 1 })));
    }

    #[test]
    fn interrupted_read_retries() {
        let bytes = wire(&[Property::new("ok", Value::Int32(8))]);
        let mut reader = PropertyReader::new(InterruptedThenData {
            interrupted: false,
            bytes,
            pos: 0,
        });
        let property = reader.read_property().unwrap().unwrap();
        assert_eq!(property.value, Value::Int32(8));
    }

    #[test]
    fn io_error_propagates() {
        let mut reader = PropertyReader::new(FailingReader);
        assert!(matches!(
            reader.read_property(),
            Err(FrameError::Io(e)) if e.kind() == ErrorKind::PermissionDenied
        ));
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::PermissionDenied))
        }
    }
}
