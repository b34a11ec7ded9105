//! Image resolution
//!
//! Turns an image source, as written in the document, into the reference a
//! renderer emits:
//!
//! 1. `http(s)://` and `data:` sources pass through unchanged.
//! 2. With a caller supplied [`ImageCallback`], its result is used as is. The
//!    callback owns any side effect such as uploading the file.
//! 3. Otherwise the file is looked up relative to the base directory and the
//!    renderer's [`ImageTarget`] decides: embedded as a base64 data URI, or
//!    referenced by absolute path.
//!
//! Results are cached per render call in an [`ImageCache`], keyed by the source
//! as written. The AST itself is never touched.

use crate::error::FormatError;
use base64::Engine;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Caller supplied image resolution: `(original_source, base_dir) -> reference`.
///
/// The lifetime lets the callback borrow caller state such as an upload client.
pub type ImageCallback<'a> = dyn Fn(&str, &Path) -> Result<String, FormatError> + 'a;

/// What a renderer needs from a local image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    /// Base64 data URI
    Embed,
    /// Absolute filesystem path
    Path,
}

/// Remote and inline sources that need no resolution.
pub fn is_passthrough(src: &str) -> bool {
    match Url::parse(src.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "data"),
        Err(_) => false,
    }
}

/// Resolve one source without caching.
pub fn resolve(
    src: &str,
    base_dir: &Path,
    target: ImageTarget,
    callback: Option<&ImageCallback<'_>>,
) -> Result<String, FormatError> {
    if is_passthrough(src) {
        return Ok(src.to_string());
    }

    if let Some(callback) = callback {
        log::debug!("resolving image {src} through callback");
        return callback(src, base_dir);
    }

    let path = locate(src, base_dir)?;
    match target {
        ImageTarget::Embed => embed(&path),
        ImageTarget::Path => Ok(path.display().to_string()),
    }
}

/// Absolute path of an existing local image.
pub fn locate(src: &str, base_dir: &Path) -> Result<PathBuf, FormatError> {
    let path = base_dir.join(src);
    if !path.is_file() {
        return Err(FormatError::ResourceError(format!(
            "image file not found: {}",
            path.display()
        )));
    }
    path.canonicalize().map_err(|e| {
        FormatError::ResourceError(format!("cannot resolve image {}: {e}", path.display()))
    })
}

/// Base64 data URI for a local file.
pub fn embed(path: &Path) -> Result<String, FormatError> {
    let bytes = fs::read(path).map_err(|e| {
        FormatError::ResourceError(format!("failed to read image {}: {e}", path.display()))
    })?;
    log::debug!("embedding {} ({} bytes)", path.display(), bytes.len());
    Ok(format!(
        "data:{};base64,{}",
        guess_mime_type(path),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("tiff" | "tif") => "image/tiff",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Per-render memo of resolved image references.
#[derive(Debug, Default)]
pub struct ImageCache {
    resolved: BTreeMap<String, String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        src: &str,
        base_dir: &Path,
        target: ImageTarget,
        callback: Option<&ImageCallback<'_>>,
    ) -> Result<String, FormatError> {
        if let Some(hit) = self.resolved.get(src) {
            return Ok(hit.clone());
        }
        let reference = resolve(src, base_dir, target, callback)?;
        self.resolved.insert(src.to_string(), reference.clone());
        Ok(reference)
    }

    pub fn get(&self, src: &str) -> Option<&str> {
        self.resolved.get(src).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
