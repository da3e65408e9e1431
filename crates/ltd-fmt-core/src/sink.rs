//! Output sinks.

use std::io::Write;

use crate::error::FormatError;

/// An append-only text destination.
pub trait Sink {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError>;
}

impl Sink for String {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError> {
        self.push_str(text);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError> {
        (**self).write_text(text)
    }
}

/// Adapts an [`std::io::Write`] stream into a [`Sink`].
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    inner: W,
}

impl<W: Write> StreamSink<W> {
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn flush(&mut self) -> Result<(), FormatError> {
        self.inner.flush()?;
        Ok(())
    }

    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn string_sink_appends() {
        let mut s = String::from("a");
        s.write_text("bc").unwrap();
        (&mut s).write_text("d").unwrap();
        assert_eq!(s, "abcd");
    }

    #[test]
    fn stream_sink_writes_bytes() {
        let mut sink = StreamSink::new(Vec::new());
        sink.write_text("héllo").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.get_ref().as_slice(), "héllo".as_bytes());
        assert_eq!(sink.into_inner(), "héllo".as_bytes());
    }

    #[test]
    fn stream_failure_surfaces_as_sink_error() {
        let mut sink = StreamSink::new(Closed);
        let err = sink.write_text("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Sink);
    }
}
