//! A folder of presentation documents.

use pro_core::{Content, Document, Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codec::DocumentCodec;
use crate::naming::{extract_number, matches_number, output_file_name, PRESENTATION_EXTENSION};

/// A library folder. Only the top level is searched.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open an existing library folder.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Library not found: {}", root.display()),
            )));
        }
        Ok(Self { root })
    }

    /// Open an output folder, creating it if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All presentation documents, sorted by file name.
    pub fn presentations(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_presentation = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PRESENTATION_EXTENSION));
            if path.is_file() && is_presentation {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Documents for `book` number `number`. Usually one; several when a song
    /// has variants.
    pub fn find(&self, book: &str, number: u32) -> Result<Vec<PathBuf>> {
        Ok(self
            .presentations()?
            .into_iter()
            .filter(|path| file_name(path).is_some_and(|name| matches_number(book, number, name)))
            .collect())
    }

    /// Highest song number present for `book`.
    pub fn highest_number(&self, book: &str) -> Result<Option<u32>> {
        Ok(self
            .presentations()?
            .iter()
            .filter_map(|path| file_name(path).and_then(|name| extract_number(book, name)))
            .max())
    }

    /// Read and decode the document at `path`.
    pub fn read_document(&self, codec: &dyn DocumentCodec, path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        let file = codec.decode(&bytes)?;
        log::debug!("Read {} cues from {}", file.cues.len(), path.display());
        Document::from_file(file)
    }

    /// Encode `document` and write it under the name derived from `content`.
    pub fn write_document(
        &self,
        codec: &dyn DocumentCodec,
        content: &Content,
        document: Document,
    ) -> Result<PathBuf> {
        let path = self.root.join(output_file_name(content));
        let bytes = codec.encode(&document.into_file())?;
        fs::write(&path, bytes)?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
