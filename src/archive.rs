//! Archive sink — collects (path, bytes) artifact entries for delivery.
//!
//! Path convention: `<stageFolder>/<sanitizedClientName> - <caseCode>.oft`.
//! Two rows with the same (client, case code) collide on the same path;
//! the last write wins silently. Known gap, surfaced at `warn` level.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::FileOptions;

use crate::error::ArchiveError;

/// Replace filesystem-illegal characters with `-` and collapse whitespace.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\n' | '\r' | '\t' => '-',
            _ => ch,
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accepts artifact entries to be packaged for the end user.
pub trait ArchiveSink {
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError>;
}

// ── In-memory sink ──────────────────────────────────────────────────

/// Ordered in-memory archive; re-putting a path replaces the entry.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArchiveSink for MemoryArchive {
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p == path) {
            tracing::warn!(path, "archive path collision, overwriting previous entry");
            entry.1 = bytes.to_vec();
        } else {
            self.entries.push((path.to_string(), bytes.to_vec()));
        }
        Ok(())
    }
}

// ── Zip sink ────────────────────────────────────────────────────────

/// Zip-backed sink producing the downloadable archive bytes.
pub struct ZipSink {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipSink {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Finish the archive and return the zip bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, ArchiveError> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ArchiveError::FinishFailed {
                reason: e.to_string(),
            })?;
        Ok(cursor.into_inner())
    }
}

impl Default for ZipSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink for ZipSink {
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.writer
            .start_file(path, options)
            .map_err(|e| ArchiveError::WriteFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        self.writer.write_all(bytes)?;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
