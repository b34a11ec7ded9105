//! Learning management system instance handle
//!
//! The LMS-HTML format references resources that an uploader has already
//! placed on the LMS: uploaded files by identifier and equations through the
//! instance's equation image service.

use crate::error::FormatError;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LmsInstance {
    pub base_url: Url,
    pub course_id: String,
}

impl LmsInstance {
    pub fn new(base_url: Url, course_id: impl Into<String>) -> Self {
        LmsInstance {
            base_url,
            course_id: course_id.into(),
        }
    }

    /// Parse the base URL from a string.
    pub fn parse(base_url: &str, course_id: impl Into<String>) -> Result<Self, FormatError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            FormatError::ResourceError(format!("invalid LMS base URL {base_url}: {e}"))
        })?;
        Ok(Self::new(base_url, course_id))
    }

    /// `{base}/courses/{course}/files/{file}/preview`
    pub fn file_preview_url(&self, file_id: &str) -> String {
        self.join(&["courses", &self.course_id, "files", file_id, "preview"])
    }

    /// `{base}/equation_images/{tex}`, with the TeX percent-encoded.
    pub fn equation_image_url(&self, tex: &str) -> String {
        self.join(&["equation_images", tex])
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}
