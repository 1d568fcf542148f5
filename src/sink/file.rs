use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::WriterContext;
use crate::error::{Result, WriterError};
use crate::sink::traits::{Sink, SinkProvider};

/// Counts the bytes that reach the wrapped writer.
struct OffsetTracker<W> {
    inner: W,
    offset: u64,
}

impl<W: Write> Write for OffsetTracker<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.offset += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A buffered sink writing to a newly created file.
///
/// The reported offset counts bytes handed to the OS, so it trails the bytes
/// written into the sink by at most the buffer size until [`Write::flush`].
pub struct FileSink {
    path: PathBuf,
    /// Buffered file. `None` once closed, which releases the file handle.
    writer: Option<BufWriter<OffsetTracker<File>>>,
    /// Offset of the file when it was closed.
    final_offset: u64,
    sync_on_close: bool,
}

impl FileSink {
    /// Creates the file at `path`, failing if it already exists.
    pub fn create(path: impl Into<PathBuf>, context: &WriterContext) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;

        Ok(Self {
            path,
            writer: Some(BufWriter::with_capacity(
                context.buffer_size,
                OffsetTracker {
                    inner: file,
                    offset: 0,
                },
            )),
            final_offset: 0,
            sync_on_close: context.sync_on_close,
        })
    }

    /// Path of the file this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer_mut(&mut self) -> io::Result<&mut BufWriter<OffsetTracker<File>>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "file sink is closed"))
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer_mut()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer_mut()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer_mut()?.flush()
    }
}

impl Sink for FileSink {
    fn current_offset(&self) -> u64 {
        match &self.writer {
            Some(writer) => writer.get_ref().offset,
            None => self.final_offset,
        }
    }

    fn close(&mut self, abort: bool) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        let flushed = writer.flush();
        // into_parts drops whatever could not be flushed instead of retrying on drop.
        let (tracker, _) = writer.into_parts();
        self.final_offset = tracker.offset;
        flushed?;

        if !abort && self.sync_on_close {
            tracker.inner.sync_all()?;
        }

        debug!(
            "Closed file sink {} at offset {} (abort: {})",
            self.path.display(),
            self.final_offset,
            abort
        );
        Ok(())
    }
}

/// Provider creating [`FileSink`]s on the local filesystem.
///
/// Destinations are file paths, resolved against an optional root directory.
/// Parent directories are not created; a missing parent is a creation failure.
///
/// # Example
/// ```no_run
/// use delimited_writer::config::WriterContext;
/// use delimited_writer::sink::{LocalFileSystem, SinkProvider};
///
/// let fs = LocalFileSystem::with_root("/tmp/records");
/// let sink = fs.create("part-00000", &WriterContext::default()).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    root: Option<PathBuf>,
}

impl LocalFileSystem {
    /// Create a provider resolving destinations relative to the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider resolving destinations under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Path a destination resolves to.
    pub fn resolve(&self, destination: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(destination),
            None => PathBuf::from(destination),
        }
    }
}

impl SinkProvider for LocalFileSystem {
    fn create(&self, destination: &str, context: &WriterContext) -> Result<Box<dyn Sink>> {
        let path = self.resolve(destination);
        let sink = FileSink::create(&path, context).map_err(|source| WriterError::SinkCreation {
            destination: destination.to_string(),
            source,
        })?;

        debug!("Created file sink {}", path.display());
        Ok(Box::new(sink))
    }
}
