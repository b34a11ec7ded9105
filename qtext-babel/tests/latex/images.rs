//! Images in LaTeX are referenced by absolute path.

use crate::common::image_dir;
use qtext_babel::{parse, OutputFormat, RenderOptions};

#[test]
fn test_local_image_uses_absolute_path_and_width() {
    let dir = image_dir();
    let parsed = parse(
        "<style>{\"image-width\": 0.5}</style>\n\n![dot](img/dot.png)",
        dir.path(),
    )
    .unwrap();
    let out = parsed
        .render(OutputFormat::Latex, &RenderOptions::default())
        .unwrap();

    let path = dir.path().join("img/dot.png").canonicalize().unwrap();
    assert_eq!(
        out,
        format!("\\includegraphics[width=0.5\\linewidth]{{{}}}\n", path.display())
    );
}

#[test]
fn test_missing_image_is_a_resource_error() {
    let dir = image_dir();
    let parsed = parse("![x](nope.png)", dir.path()).unwrap();
    let err = parsed
        .render(OutputFormat::Latex, &RenderOptions::default())
        .unwrap_err();
    assert!(err.is_resource_error());
}

#[test]
fn test_image_path_with_comment_char_is_refused() {
    let dir = image_dir();
    std::fs::copy(dir.path().join("img/dot.png"), dir.path().join("img/a#1.png")).unwrap();
    let parsed = parse("![x](<img/a#1.png>)", dir.path()).unwrap();
    let err = parsed
        .render(OutputFormat::Latex, &RenderOptions::default())
        .unwrap_err();
    assert!(err.is_resource_error());
}
