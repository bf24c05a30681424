use super::*;

#[test]
fn request_defaults_match_shell_defaults() {
    let r = RenderRequest::default();
    assert_eq!((r.width, r.height), (256, 256));
    assert_eq!(r.format, ExportFormat::Png);
    assert!(!r.transparent_background);
    assert!(!r.circular_crop);
    assert_eq!(r.fps, 20);
    r.validate().unwrap();
}

#[test]
fn request_validate_rejects_bad_values() {
    let zero = RenderRequest {
        width: 0,
        ..Default::default()
    };
    assert!(matches!(zero.validate(), Err(SvgshotError::Validation(_))));

    let huge = RenderRequest {
        height: MAX_DIM + 1,
        ..Default::default()
    };
    assert!(matches!(huge.validate(), Err(SvgshotError::Validation(_))));

    let no_fps = RenderRequest {
        fps: 0,
        ..Default::default()
    };
    assert!(matches!(no_fps.validate(), Err(SvgshotError::Validation(_))));
}

#[test]
fn file_names_follow_format() {
    let mut r = RenderRequest {
        width: 512,
        height: 128,
        ..Default::default()
    };
    assert_eq!(r.file_name(), "icon-512x128.png");
    r.format = ExportFormat::Gif;
    assert_eq!(r.file_name(), "icon-512x128.gif");
    r.format = ExportFormat::Svg;
    assert_eq!(r.file_name(), "icon.svg");
}

#[test]
fn describe_lists_relevant_options() {
    let r = RenderRequest {
        transparent_background: true,
        circular_crop: true,
        ..Default::default()
    };
    assert_eq!(r.describe(false), "256 × 256 · PNG · transparent · circle");

    let gif = RenderRequest {
        format: ExportFormat::Gif,
        ..r.clone()
    };
    assert_eq!(gif.describe(true), "256 × 256 · GIF · animated · circle");
    assert_eq!(gif.describe(false), "256 × 256 · GIF · circle");

    let svg = RenderRequest {
        format: ExportFormat::Svg,
        ..r
    };
    assert_eq!(svg.describe(false), "SVG");
}

#[test]
fn request_json_uses_lowercase_formats_and_defaults() {
    let r: RenderRequest = serde_json::from_str(r#"{"format":"webp","width":64}"#).unwrap();
    assert_eq!(r.format, ExportFormat::Webp);
    assert_eq!(r.width, 64);
    assert_eq!(r.height, DEFAULT_DIM);

    let json = serde_json::to_string(&RenderRequest::default()).unwrap();
    assert!(json.contains(r#""format":"png""#));
}

#[test]
fn mime_types() {
    assert_eq!(ExportFormat::Svg.mime(), "image/svg+xml");
    assert_eq!(ExportFormat::Png.mime(), "image/png");
    assert_eq!(ExportFormat::Webp.mime(), "image/webp");
    assert_eq!(ExportFormat::Gif.mime(), "image/gif");
    assert_eq!(Blob::new(ExportFormat::Gif, vec![1]).mime, "image/gif");
}
