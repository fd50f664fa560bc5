use std::{
    fmt,
    io::{self, Write},
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

/// Process-wide destination used by every logger built without its own output.
static GLOBAL_OUTPUT: LazyLock<Mutex<Box<dyn Write + Send>>> =
    LazyLock::new(|| Mutex::new(Box::new(io::stdout())));

/// Redirects all future output of loggers using the global sink (stdout by default).
///
/// Meant to be called once at startup or from tests. Swapping while other threads
/// are logging is safe but the switch point between the two writers is unspecified.
pub fn set_output<W: Write + Send + 'static>(writer: W) {
    *GLOBAL_OUTPUT.lock().unwrap_or_else(PoisonError::into_inner) = Box::new(writer);
}

/// Where a logger writes its rendered batches.
pub(crate) enum Output {
    Global,
    Owned(Box<dyn Write + Send>),
}

impl Output {
    /// Writes one rendered batch. Errors are dropped: a failed terminal write
    /// must not take the host program down.
    pub(crate) fn write_batch(&mut self, batch: &str) {
        let _ = match self {
            Output::Global => {
                let mut out = GLOBAL_OUTPUT.lock().unwrap_or_else(PoisonError::into_inner);
                write_and_flush(&mut **out, batch)
            }
            Output::Owned(out) => write_and_flush(&mut **out, batch),
        };
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Global => f.write_str("Output::Global"),
            Output::Owned(_) => f.write_str("Output::Owned(..)"),
        }
    }
}

fn write_and_flush(out: &mut dyn Write, batch: &str) -> io::Result<()> {
    out.write_all(batch.as_bytes())?;
    out.flush()
}

/// Cloneable in-memory writer. All clones share the same buffer, which makes it
/// handy for capturing what a logger printed.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Takes the captured output, leaving the buffer empty.
    pub fn take(&self) -> String {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = std::mem::take(&mut *buffer);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
struct FailingWriter;

#[cfg(test)]
impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[test]
fn test_memory_writer() {
    let writer = MemoryWriter::new();
    let mut output = Output::Owned(Box::new(writer.clone()));
    output.write_batch("first\n");
    output.write_batch("second\n");
    assert_eq!(writer.contents(), "first\nsecond\n");
    assert_eq!(writer.take(), "first\nsecond\n");
    assert_eq!(writer.contents(), "");
}

#[test]
fn test_write_errors_are_swallowed() {
    let mut output = Output::Owned(Box::new(FailingWriter));
    output.write_batch("lost\n");
}
