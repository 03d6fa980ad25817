//! Destinations and their file handles

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{Severity, Target};
use crate::core::{IoResultExt, Result};

/// Shared file name used by folder mode without per-level split
pub const SHARED_FILE_NAME: &str = "log.log";

/// Resolved output of a logger
///
/// Files opened at configure time live as long as the destination; dropping
/// the destination (on reconfigure) closes them.
#[derive(Debug)]
pub(crate) enum Destination {
    /// Standard output, or the writer injected through the builder
    Terminal,
    /// One file for every level
    File(FileSink),
    /// A directory of log files
    Folder(FolderSink),
}

#[derive(Debug)]
pub(crate) struct FileSink {
    path: PathBuf,
    file: File,
}

#[derive(Debug)]
pub(crate) struct FolderSink {
    dir: PathBuf,
    files: FolderFiles,
}

#[derive(Debug)]
enum FolderFiles {
    Shared(FileSink),
    /// Populated on first use of each level, never shrinks
    Split(HashMap<Severity, File>),
}

impl Destination {
    /// Open every resource the target needs up front.
    ///
    /// Split folders only get their directory here; level files are
    /// created lazily by [`Destination::write`].
    pub(crate) fn open(target: &Target) -> Result<Self> {
        match target {
            Target::Terminal => Ok(Self::Terminal),
            Target::File(path) => Ok(Self::File(FileSink::open(path.clone())?)),
            Target::Folder { dir, split } => {
                fs::create_dir_all(dir).dir_context(dir)?;
                tracing::debug!(dir = %dir.display(), split, "log folder ready");

                let files = if *split {
                    FolderFiles::Split(HashMap::new())
                } else {
                    FolderFiles::Shared(FileSink::open(dir.join(SHARED_FILE_NAME))?)
                };

                Ok(Self::Folder(FolderSink {
                    dir: dir.clone(),
                    files,
                }))
            }
        }
    }

    /// Whether lines go to the terminal writer
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Write one formatted line for `level`, creating its file if needed
    pub(crate) fn write(
        &mut self,
        level: Severity,
        line: &str,
        terminal: &mut dyn Write,
    ) -> Result<()> {
        match self {
            Self::Terminal => write_line(terminal, line).write_context(|| "stdout".to_string()),
            Self::File(sink) => sink.write(line),
            Self::Folder(folder) => folder.write(level, line),
        }
    }

    /// Level files currently open, in severity order (split folders only)
    #[cfg(test)]
    pub(crate) fn open_levels(&self) -> Vec<Severity> {
        match self {
            Self::Folder(FolderSink {
                files: FolderFiles::Split(map),
                ..
            }) => {
                let mut levels: Vec<_> = map.keys().copied().collect();
                levels.sort();
                levels
            }
            _ => Vec::new(),
        }
    }
}

impl FileSink {
    fn open(path: PathBuf) -> Result<Self> {
        let file = open_append(&path)?;
        Ok(Self { path, file })
    }

    fn write(&mut self, line: &str) -> Result<()> {
        write_line(&mut self.file, line).write_context(|| self.path.display().to_string())
    }
}

impl FolderSink {
    fn write(&mut self, level: Severity, line: &str) -> Result<()> {
        match &mut self.files {
            FolderFiles::Shared(sink) => sink.write(line),
            FolderFiles::Split(files) => {
                let path = self.dir.join(level.file_name());
                let file = match files.entry(level) {
                    std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
                    std::collections::hash_map::Entry::Vacant(entry) => {
                        entry.insert(open_append(&path)?)
                    }
                };
                write_line(file, line).write_context(|| path.display().to_string())
            }
        }
    }
}

fn open_append(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .open_context(path)?;
    tracing::debug!(path = %path.display(), "log file opened");
    Ok(file)
}

fn write_line(writer: &mut (impl Write + ?Sized), line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.flush()
}
