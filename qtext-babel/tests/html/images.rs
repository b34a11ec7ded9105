//! Image resolution in the HTML formats

use crate::common::{image_dir, PNG_BASE64};
use qtext_babel::{parse, FormatError, LmsInstance, OutputFormat, RenderOptions};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[test]
fn test_local_image_is_embedded() {
    let dir = image_dir();
    let parsed = parse("![dot](img/dot.png \"A dot\")", dir.path()).unwrap();
    let html = parsed
        .render(OutputFormat::Html, &RenderOptions::default())
        .unwrap();
    assert!(html.contains(&format!("src=\"data:image/png;base64,{PNG_BASE64}\"")));
    assert!(html.contains("alt=\"dot\""));
    assert!(html.contains("title=\"A dot\""));
    assert!(html.contains("style=\"width: 100%\""));
}

#[test]
fn test_image_width_from_style() {
    let dir = image_dir();
    let parsed = parse(
        "::: fig\n<style>{\"image-width\": 0.25, \"content-align\": \"right\"}</style>\n\n![dot](img/dot.png)\n:::",
        dir.path(),
    )
    .unwrap();
    let html = parsed
        .render(OutputFormat::Html, &RenderOptions::default())
        .unwrap();
    assert!(html.contains(
        "style=\"width: 25%; display: block; margin-left: auto; margin-right: 0\""
    ));
}

#[test]
fn test_missing_image_is_a_resource_error() {
    let dir = image_dir();
    let parsed = parse("![gone](img/gone.png)", dir.path()).unwrap();
    let err = parsed
        .render(OutputFormat::Html, &RenderOptions::default())
        .unwrap_err();
    assert!(err.is_resource_error());
}

#[test]
fn test_callback_sees_original_source_once_per_render() {
    let calls = RefCell::new(Vec::new());
    let callback = |src: &str, base: &Path| -> Result<String, FormatError> {
        calls.borrow_mut().push((src.to_string(), base.to_path_buf()));
        Ok(format!("https://cdn.example.com/{src}"))
    };
    let parsed = parse("![a](a.png) ![again](a.png) ![b](b.png)", Path::new("/course")).unwrap();
    let options = RenderOptions::default().with_image_callback(&callback);

    let html = parsed.render(OutputFormat::Html, &options).unwrap();
    assert_eq!(html.matches("https://cdn.example.com/a.png").count(), 2);
    assert_eq!(calls.borrow().len(), 2);
    assert_eq!(calls.borrow()[0], ("a.png".to_string(), PathBuf::from("/course")));

    // a new render starts with a fresh cache, and the AST kept the original source
    parsed.render(OutputFormat::Html, &options).unwrap();
    assert_eq!(calls.borrow().len(), 4);
}

#[test]
fn test_callback_errors_propagate() {
    let callback = |_: &str, _: &Path| -> Result<String, FormatError> {
        Err(FormatError::ResourceError("upload failed".to_string()))
    };
    let parsed = parse("![a](a.png)", Path::new(".")).unwrap();
    let err = parsed
        .render(
            OutputFormat::Html,
            &RenderOptions::default().with_image_callback(&callback),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), FormatError::ResourceError("upload failed".into()).to_string());
}

#[test]
fn test_lms_rewrites_file_identifiers_only() {
    let lms = LmsInstance::parse("https://canvas.example.edu", "1234").unwrap();
    let callback = |src: &str, _: &Path| -> Result<String, FormatError> {
        Ok(if src == "local.png" { "5678".to_string() } else { src.to_string() })
    };
    let parsed = parse(
        "![l](local.png) ![r](https://example.com/r.png)",
        Path::new("."),
    )
    .unwrap();
    let options = RenderOptions::default()
        .with_lms(&lms)
        .with_image_callback(&callback);
    let html = parsed.render(OutputFormat::LmsHtml, &options).unwrap();
    assert!(html.contains("src=\"https://canvas.example.edu/courses/1234/files/5678/preview\""));
    assert!(html.contains("src=\"https://example.com/r.png\""));
}
