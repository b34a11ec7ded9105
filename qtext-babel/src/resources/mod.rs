//! Resource resolvers for images, math and LMS-hosted references

pub mod image;
pub mod lms;
pub mod math;

pub use image::{ImageCache, ImageCallback, ImageTarget};
pub use lms::LmsInstance;
pub use math::{default_tool, delimit, ExternalMathTool, MathRenderer, NoMathRenderer};
