//! Per-render state

use super::RenderOptions;
use crate::error::FormatError;
use crate::format::OutputFormat;
use crate::resources::image::{ImageCache, ImageTarget};
use crate::resources::math::{default_tool, MathRenderer};
use crate::style::{self, keys, Alignment, AppliedStyle, StyleCascade, StyleMap, TableStyle};
use std::path::Path;

/// State owned by one render call: options, image cache and style cascade.
///
/// Created fresh by [`super::render`] and dropped when it returns.
pub struct RenderContext<'a> {
    pub format: OutputFormat,
    pub base_dir: &'a Path,
    pub options: RenderOptions<'a>,
    images: ImageCache,
    cascade: StyleCascade,
}

impl<'a> RenderContext<'a> {
    pub fn new(format: OutputFormat, base_dir: &'a Path, options: RenderOptions<'a>) -> Self {
        RenderContext {
            format,
            base_dir,
            options,
            images: ImageCache::new(),
            cascade: StyleCascade::new(),
        }
    }

    /// Resolve an image source, once per source per render.
    pub fn resolve_image(&mut self, src: &str, target: ImageTarget) -> Result<String, FormatError> {
        self.images
            .resolve(src, self.base_dir, target, self.options.image_callback)
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Injected math renderer, or the shared default tool.
    pub fn math(&self) -> &'a dyn MathRenderer {
        match self.options.math {
            Some(math) => math,
            None => default_tool(),
        }
    }

    pub fn enter_container(&mut self, own: &StyleMap) -> AppliedStyle {
        self.cascade.enter(own)
    }

    pub fn leave_container(&mut self) {
        self.cascade.leave();
    }

    /// Full style at the current position.
    pub fn style(&self) -> &StyleMap {
        self.cascade.current()
    }

    pub fn container_depth(&self) -> usize {
        self.cascade.depth()
    }

    pub fn table_style(&self) -> TableStyle {
        TableStyle::resolve(self.style(), &self.options.style_defaults)
    }

    pub fn image_width(&self) -> f64 {
        style::image_width(self.style(), &self.options.style_defaults)
    }

    pub fn content_align(&self) -> Option<Alignment> {
        self.style().alignment(keys::CONTENT_ALIGN)
    }
}
