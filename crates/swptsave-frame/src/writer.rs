use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_property, Property};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete properties to any `Write` stream.
///
/// Each property is encoded and size-patched in memory before any of its
/// bytes reach the stream, so the sink does not need to be seekable.
pub struct PropertyWriter<T> {
    inner: T,
    buf: BytesMut,
    written: u64,
}

impl<T: Write> PropertyWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            written: 0,
        }
    }

    /// Encode and write one property (blocking).
    pub fn write_property(&mut self, property: &Property) -> Result<()> {
        self.buf.clear();
        encode_property(property, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::Io(ErrorKind::WriteZero.into())),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        trace!(
            offset = self.written,
            size = self.buf.len(),
            name = %property.name,
            "encoded property"
        );
        self.written += self.buf.len() as u64;
        Ok(())
    }

    /// Write every property in order.
    pub fn write_all<'a, I>(&mut self, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Property>,
    {
        for property in properties {
            self.write_property(property)?;
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Flush and return the inner stream.
    pub fn finish(mut self) -> Result<T> {
        self.flush()?;
        Ok(self.inner)
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use swptsave_types::{Value, Vector3};

    use super::*;
    use crate::codec::encode_property_to_vec;
    use crate::reader::PropertyReader;

    #[test]
    fn write_matches_buffer_encoding() {
        let property = Property::new("pos", Value::Vector3(Vector3::new(1.0, 2.0, 3.0)));
        let mut writer = PropertyWriter::new(Vec::new());
        writer.write_property(&property).unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, encode_property_to_vec(&property).unwrap());
    }

    #[test]
    fn write_then_read_back() {
        let props = vec![
            Property::new("a", Value::Int32(1)),
            Property::new("b", Value::String("bee".into())),
            Property::new("a", Value::Bool(true)),
        ];
        let mut writer = PropertyWriter::new(Cursor::new(Vec::new()));
        writer.write_all(&props).unwrap();
        let total = writer.bytes_written();
        let cursor = writer.finish().unwrap();
        assert_eq!(cursor.get_ref().len() as u64, total);

        let mut reader = PropertyReader::new(Cursor::new(cursor.into_inner()));
        assert_eq!(reader.read_all().unwrap(), props);
    }

    #[test]
    fn failed_encode_writes_nothing() {
        let mut writer = PropertyWriter::new(Vec::new());
        writer
            .write_property(&Property::new("ok", Value::Int32(1)))
            .unwrap();
        let before = writer.bytes_written();

        let bad = Property::new("\u{2603}", Value::Int32(2));
        assert!(matches!(
            writer.write_property(&bad),
            Err(FrameError::InvalidName(_))
        ));
        assert_eq!(writer.bytes_written(), before);
        assert_eq!(writer.get_ref().len() as u64, before);
    }

    #[test]
    fn short_writes_are_completed() {
        let property = Property::new("chunked", Value::String("x".repeat(64)));
        let mut writer = PropertyWriter::new(TwoBytesAtATime(Vec::new()));
        writer.write_property(&property).unwrap();
        let inner = writer.finish().unwrap();
        assert_eq!(inner.0, encode_property_to_vec(&property).unwrap());
    }

    #[test]
    fn zero_length_write_is_an_error() {
        let mut writer = PropertyWriter::new(FullSink);
        let err = writer
            .write_property(&Property::new("x", Value::Int32(0)))
            .unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WriteZero));
    }

    struct TwoBytesAtATime(Vec<u8>);

    impl Write for TwoBytesAtATime {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(2);
            self.0.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FullSink;

    impl Write for FullSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
