//! Subtree extraction from whole-repository zip archives.
//!
//! Repository zipballs contain exactly one top-level directory (an
//! artifact of how the hosting API generates them: `<repo>-<sha>/...`).
//! Repackaging filters the archive down to one sub-directory and re-roots
//! the surviving entries under a caller-chosen name, copying file bytes
//! verbatim.

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Errors from archive download and repackaging. There is no cache to fall
/// back to for downloads, so every anomaly surfaces.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive endpoint answered with a non-success status.
    #[error("archive download failed with status {status}: {body}")]
    DownloadFailed { status: u16, body: String },

    /// Network or connection error while downloading.
    #[error("archive download error: {0}")]
    Transport(String),

    /// The source archive contains no entries at all.
    #[error("source archive is empty")]
    EmptyArchive,

    /// No entry matched the requested sub-path.
    #[error("path not found in archive: {path}")]
    PathNotFound { path: String },

    #[error("archive format error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A repackaged archive ready to stream to the requester.
#[derive(Debug, Clone)]
pub struct RepackagedArchive {
    pub bytes: Vec<u8>,
    /// Top-level directory name inside the archive.
    pub root_dir: String,
}

/// Repackage `archive_bytes` down to `target_sub_path`, re-rooted under
/// `output_dir_name`.
///
/// An empty `target_sub_path` (after trimming slashes) means the whole
/// repository was requested; the input bytes are returned unchanged.
pub fn repackage(
    archive_bytes: &[u8],
    target_sub_path: &str,
    output_dir_name: &str,
) -> Result<RepackagedArchive, ArchiveError> {
    let target = target_sub_path.trim_matches('/');
    if target.is_empty() {
        return Ok(RepackagedArchive {
            bytes: archive_bytes.to_vec(),
            root_dir: output_dir_name.to_string(),
        });
    }

    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;
    if archive.is_empty() {
        return Err(ArchiveError::EmptyArchive);
    }

    // The top-level directory name is discovered from the first entry, not
    // assumed to follow the `<repo>-<ref>` pattern.
    let root = {
        let first = archive.by_index(0)?;
        first
            .name()
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string()
    };
    let prefix = format!("{root}/{target}/");

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let mut written_dirs: HashSet<String> = HashSet::new();
    let mut matched = 0usize;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };
        matched += 1;

        if entry.is_dir() {
            let dir = format!("{output_dir_name}/{rest}");
            let dir = dir.trim_end_matches('/');
            if !dir.is_empty() && written_dirs.insert(dir.to_string()) {
                writer.add_directory(dir, options)?;
            }
        } else {
            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut contents)?;
            writer.start_file(format!("{output_dir_name}/{rest}"), options)?;
            writer.write_all(&contents)?;
        }
    }

    if matched == 0 {
        return Err(ArchiveError::PathNotFound {
            path: target.to_string(),
        });
    }

    let cursor = writer.finish()?;
    Ok(RepackagedArchive {
        bytes: cursor.into_inner(),
        root_dir: output_dir_name.to_string(),
    })
}
