use crate::rules::{HandleId, HandleRegistry};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("No output registered for handle {0}")]
    UnknownSink(HandleId),

    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read capture '{path}': {source}")]
    Capture {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where routed records end up
pub trait SinkRouter {
    /// Append one record to a sink
    fn write(&mut self, sink: HandleId, record: &str) -> Result<(), SinkError>;

    /// Flush and release a sink; closing twice is a no-op
    fn close(&mut self, sink: HandleId) -> Result<(), SinkError>;
}

/// Writes each handle's records to its file, one per line
///
/// Files are created (truncating old content) on the first write. Handles
/// pointing at the same file share one writer, and a file reopened after
/// `close` is appended to.
#[derive(Debug, Default)]
pub struct FileSinkRouter {
    targets: HashMap<HandleId, PathBuf>,
    open: HashMap<PathBuf, BufWriter<File>>,
    created: HashSet<PathBuf>,
}

/// Key shared by every spelling of one output path
fn output_key(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

impl FileSinkRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_handles(handles: &HandleRegistry) -> Self {
        let mut router = Self::new();
        for handle in handles.iter() {
            router.register(handle.id, handle.file.clone());
        }
        router
    }

    pub fn register(&mut self, sink: HandleId, path: impl Into<PathBuf>) {
        self.targets.insert(sink, output_key(path.into()));
    }

    pub fn close_all(&mut self) -> Result<(), SinkError> {
        let mut paths: Vec<PathBuf> = self.open.keys().cloned().collect();
        paths.sort_unstable();
        for path in paths {
            flush(&path, self.open.remove(&path))?;
        }
        Ok(())
    }

    fn target(&self, sink: HandleId) -> Result<PathBuf, SinkError> {
        self.targets
            .get(&sink)
            .cloned()
            .ok_or(SinkError::UnknownSink(sink))
    }

    fn writer(&mut self, path: &Path) -> Result<&mut BufWriter<File>, SinkError> {
        match self.open.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let file = if self.created.contains(path) {
                    OpenOptions::new().append(true).open(path)
                } else {
                    debug!(path = %path.display(), "creating output");
                    File::create(path)
                }
                .map_err(|source| write_error(path, source))?;
                self.created.insert(path.to_path_buf());
                Ok(entry.insert(BufWriter::new(file)))
            }
        }
    }
}

fn write_error(path: &Path, source: io::Error) -> SinkError {
    SinkError::Write {
        path: path.display().to_string(),
        source,
    }
}

fn flush(path: &Path, writer: Option<BufWriter<File>>) -> Result<(), SinkError> {
    match writer {
        Some(mut writer) => writer.flush().map_err(|e| write_error(path, e)),
        None => Ok(()),
    }
}

impl SinkRouter for FileSinkRouter {
    fn write(&mut self, sink: HandleId, record: &str) -> Result<(), SinkError> {
        let path = self.target(sink)?;
        let writer = self.writer(&path)?;
        writeln!(writer, "{record}").map_err(|e| write_error(&path, e))
    }

    fn close(&mut self, sink: HandleId) -> Result<(), SinkError> {
        match self.targets.get(&sink) {
            Some(path) => flush(path, self.open.remove(path)),
            None => Ok(()),
        }
    }
}

impl Drop for FileSinkRouter {
    fn drop(&mut self) {
        let _ = self.close_all();
    }
}
