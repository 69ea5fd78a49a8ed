use std::path::Path;

use image::{ColorType, Rgb, RgbImage, Rgba};
use text_watermark::{
    process_directory, process_file, Error, Position, WatermarkFont, WatermarkSpec,
};

fn write_test_image(path: &Path, w: u32, h: u32, px: Rgb<u8>) {
    RgbImage::from_pixel(w, h, px).save(path).unwrap();
}

#[test]
fn png_output_keeps_alpha_channel() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.png");
    write_test_image(&input, 400, 200, Rgb([20, 40, 60]));

    let spec = WatermarkSpec::new("watermarked");
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();

    assert!(output.exists());
    let saved = image::open(&output).unwrap();
    assert_eq!(saved.color(), ColorType::Rgba8);
    assert_eq!(saved.to_rgba8().dimensions(), (400, 200));
}

#[test]
fn jpeg_output_flattens_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.jpg");
    write_test_image(&input, 400, 200, Rgb([20, 40, 60]));

    let spec = WatermarkSpec::new("watermarked");
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();

    let saved = image::open(&output).unwrap();
    assert!(!saved.color().has_alpha());
}

#[test]
fn jpeg_uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.JPEG");
    write_test_image(&input, 200, 100, Rgb([20, 40, 60]));

    let spec = WatermarkSpec::new("watermarked");
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();
    assert!(output.exists());
}

#[test]
fn gif_output_is_rejected_and_nothing_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.gif");
    write_test_image(&input, 200, 100, Rgb([20, 40, 60]));

    let spec = WatermarkSpec::new("watermarked");
    let err = process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(!output.exists());
}

#[test]
fn missing_input_aborts_with_image_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.png");

    let spec = WatermarkSpec::new("watermarked");
    let err = process_file(
        &dir.path().join("missing.png"),
        &output,
        &spec,
        &WatermarkFont::default_font(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ImageNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn undecodable_input_aborts_with_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    let output = dir.path().join("out.png");
    std::fs::write(&input, b"not actually a png").unwrap();

    let spec = WatermarkSpec::new("watermarked");
    let err = process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert!(!output.exists());
}

#[test]
fn opacity_zero_round_trips_the_original_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.png");
    write_test_image(&input, 120, 80, Rgb([13, 77, 200]));

    let spec = WatermarkSpec {
        opacity: 0,
        ..WatermarkSpec::new("invisible")
    };
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();

    let saved = image::open(&output).unwrap().to_rgba8();
    assert!(saved.pixels().all(|p| *p == Rgba([13, 77, 200, 255])));
}

#[test]
fn opacity_255_paints_opaque_white_glyphs_in_the_anchored_corner() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("photo_watermark.png");
    write_test_image(&input, 400, 200, Rgb([0, 0, 0]));

    let spec = WatermarkSpec {
        position: Position::BottomRight,
        opacity: 255,
        ..WatermarkSpec::new("mark")
    };
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();

    let saved = image::open(&output).unwrap().to_rgba8();

    // White ink appears, and only in the bottom-right quadrant.
    let bottom_right_has_ink = saved
        .enumerate_pixels()
        .any(|(x, y, p)| x >= 200 && y >= 100 && p[0] == 255 && p[3] == 255);
    assert!(bottom_right_has_ink);

    for (x, y, p) in saved.enumerate_pixels() {
        if x < 200 && y < 100 {
            assert_eq!(*p, Rgba([0, 0, 0, 255]), "ink bled to ({x},{y})");
        }
    }
}

#[test]
fn each_corner_keeps_ink_in_its_own_quadrant() {
    let font = WatermarkFont::default_font();
    for (position, quadrant) in [
        (Position::TopLeft, (0u32, 0u32)),
        (Position::TopRight, (200, 0)),
        (Position::BottomLeft, (0, 100)),
        (Position::BottomRight, (200, 100)),
    ] {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 400, 200, Rgb([0, 0, 0]));

        let spec = WatermarkSpec {
            position,
            opacity: 255,
            ..WatermarkSpec::new("hi")
        };
        process_file(&input, &output, &spec, &font).unwrap();

        let saved = image::open(&output).unwrap().to_rgba8();
        let (qx, qy) = quadrant;
        let ink_in_quadrant = saved.enumerate_pixels().any(|(x, y, p)| {
            (qx..qx + 200).contains(&x) && (qy..qy + 100).contains(&y) && p[0] > 0
        });
        assert!(ink_in_quadrant, "no ink in {position} quadrant");

        let ink_elsewhere = saved.enumerate_pixels().any(|(x, y, p)| {
            !((qx..qx + 200).contains(&x) && (qy..qy + 100).contains(&y)) && p[0] > 0
        });
        assert!(!ink_elsewhere, "ink outside {position} quadrant");
    }
}

#[test]
fn custom_font_file_is_used_for_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    let output = dir.path().join("out.png");
    write_test_image(&input, 600, 300, Rgb([0, 0, 0]));

    // Any valid outline font works; reuse the embedded face as a file.
    let font_path = dir.path().join("custom.ttf");
    std::fs::write(
        &font_path,
        include_bytes!("../src/fonts/DejaVuSans.ttf"),
    )
    .unwrap();

    let font = WatermarkFont::from_path(&font_path).unwrap();
    let spec = WatermarkSpec {
        opacity: 255,
        ..WatermarkSpec::new("sized 40")
    };
    process_file(&input, &output, &spec, &font).unwrap();

    let saved = image::open(&output).unwrap().to_rgba8();
    assert!(saved.pixels().any(|p| p[0] == 255));
}

#[test]
fn batch_mode_watermarks_every_supported_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&input_dir).unwrap();

    write_test_image(&input_dir.join("a.png"), 100, 60, Rgb([10, 10, 10]));
    write_test_image(&input_dir.join("b.jpg"), 100, 60, Rgb([10, 10, 10]));
    std::fs::write(input_dir.join("notes.txt"), "not an image").unwrap();

    let spec = WatermarkSpec::new("batch");
    let results = process_directory(
        &input_dir,
        &output_dir,
        &spec,
        &WatermarkFont::default_font(),
    );

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.success));
    assert!(output_dir.join("a.png").exists());
    assert!(output_dir.join("b.jpg").exists());
    assert!(!output_dir.join("notes.txt").exists());
}

#[test]
fn batch_mode_reports_per_file_failures_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir(&input_dir).unwrap();

    write_test_image(&input_dir.join("good.png"), 100, 60, Rgb([10, 10, 10]));
    std::fs::write(input_dir.join("bad.png"), b"corrupt").unwrap();

    let spec = WatermarkSpec::new("batch");
    let results = process_directory(
        &input_dir,
        &output_dir,
        &spec,
        &WatermarkFont::default_font(),
    );

    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.success).count(), 1);
    assert!(output_dir.join("good.png").exists());
    assert!(!output_dir.join("bad.png").exists());
}

#[test]
fn oversized_text_renders_partially_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    let output = dir.path().join("out.png");
    write_test_image(&input, 32, 16, Rgb([0, 0, 0]));

    let spec = WatermarkSpec {
        opacity: 255,
        ..WatermarkSpec::new("this text is much wider than the canvas")
    };
    process_file(&input, &output, &spec, &WatermarkFont::default_font()).unwrap();

    let saved = image::open(&output).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (32, 16));
}
