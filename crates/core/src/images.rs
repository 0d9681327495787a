//! Resolves record filenames to image files on disk. Nothing is decoded here.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Found(PathBuf),
    /// Carries the first path that was tried.
    NotFound(PathBuf),
}

impl ImageStatus {
    pub fn path(&self) -> &Path {
        match self {
            ImageStatus::Found(p) | ImageStatus::NotFound(p) => p,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ImageStatus::Found(_))
    }
}

#[derive(Debug, Clone)]
pub struct ImageLocator {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl ImageLocator {
    pub fn new(dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            dir: dir.into(),
            extensions,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A name already ending in a known extension is used as is; otherwise
    /// each extension is appended in turn and the bare name is tried last.
    pub fn candidates(&self, filename: &str) -> Vec<PathBuf> {
        let lower = filename.to_lowercase();
        let has_known_ext = self
            .extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")));
        if has_known_ext {
            return vec![self.dir.join(filename)];
        }
        let mut out: Vec<PathBuf> = self
            .extensions
            .iter()
            .map(|ext| self.dir.join(format!("{filename}.{ext}")))
            .collect();
        out.push(self.dir.join(filename));
        out
    }

    pub fn resolve(&self, filename: &str) -> ImageStatus {
        let candidates = self.candidates(filename);
        match candidates.iter().find(|p| p.is_file()) {
            Some(found) => ImageStatus::Found(found.clone()),
            None => ImageStatus::NotFound(
                candidates
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| self.dir.join(filename)),
            ),
        }
    }
}

/// Pixel size read from the image header.
#[cfg(feature = "image-meta")]
pub fn dimensions(path: &Path) -> Option<(u32, u32)> {
    image::image_dimensions(path).ok()
}

#[cfg(not(feature = "image-meta"))]
pub fn dimensions(_path: &Path) -> Option<(u32, u32)> {
    None
}
