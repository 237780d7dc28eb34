use image::{Rgb, RgbImage, Rgba, RgbaImage};
use image_function::lessons::{self, ChannelRequest};
use image_function::visualization::{SnapshotViewer, Viewer};
use image_function::*;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Writes a 480x640 test picture and returns its path
fn create_test_picture(dir: &Path) -> PathBuf {
    let path = dir.join("messi.png");
    RgbImage::from_fn(640, 480, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 3 + y / 2) % 256) as u8])
    })
    .save(&path)
    .unwrap();
    path
}

#[test]
fn test_read_write_lesson() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());
    let output_dir = dir.path().join("out");
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let outputs = lessons::read_write(&input, &output_dir, &mut viewer, 0).unwrap();

    assert_eq!(outputs.color, output_dir.join("color.jpg"));
    assert_eq!(outputs.gray, output_dir.join("gray_scale.jpg"));
    assert_eq!(outputs.alpha, output_dir.join("alpha.jpg"));

    let color = load_image(&outputs.color, ReadMode::Unchanged).unwrap();
    assert_eq!(color.shape(), (480, 640, 3));
    let gray = load_image(&outputs.gray, ReadMode::Unchanged).unwrap();
    assert_eq!(gray.shape(), (480, 640, 1));
    assert!(outputs.alpha.exists());

    assert_eq!(viewer.snapshots().len(), 3);
    assert!(viewer.snapshot_path("Gray Scale").exists());
    assert!(viewer.open_windows().is_empty());
}

#[test]
fn test_read_write_with_alpha_source() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.png");
    RgbaImage::from_pixel(20, 10, Rgba([10, 200, 30, 99]))
        .save(&input)
        .unwrap();
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let outputs = lessons::read_write(&input, dir.path(), &mut viewer, 0).unwrap();

    // jpeg has no alpha channel
    let alpha = load_image(&outputs.alpha, ReadMode::Unchanged).unwrap();
    assert_eq!(alpha.shape(), (10, 20, 3));

    // the snapshot is png and keeps it
    let snapshot = load_image(viewer.snapshot_path("Alpha"), ReadMode::Unchanged).unwrap();
    assert_eq!(snapshot.layout(), ChannelLayout::Bgra);
}

#[test]
fn test_read_write_missing_input() {
    let dir = tempdir().unwrap();
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let result = lessons::read_write(&dir.path().join("nope.jpg"), dir.path(), &mut viewer, 0);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ImageError>(),
        Some(ImageError::FileNotFound(_))
    ));
    assert!(viewer.snapshots().is_empty());
}

#[test]
fn test_extract_channels_lesson() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let report =
        lessons::extract_channels(&input, &ChannelRequest::default(), &mut viewer, 0).unwrap();

    // picture pixel (x=332, y=187) is RGB (76, 187, 203)
    assert_eq!(report.samples, vec![203, 187, 76]);
    assert_eq!(report.plane.shape(), (480, 640, 1));
    assert_eq!(report.plane.sample(187, 332, 0).unwrap(), 203);
    assert!(viewer.snapshot_path("Color").exists());
}

#[test]
fn test_extract_channels_sub_region() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let request = ChannelRequest {
        channel: 2,
        rows: Some(100..200),
        cols: Some(200..300),
        ..ChannelRequest::default()
    };
    let report = lessons::extract_channels(&input, &request, &mut viewer, 0).unwrap();
    assert_eq!(report.plane.shape(), (100, 100, 1));
    // red channel holds x
    assert_eq!(report.plane.sample(0, 0, 0).unwrap(), 200);

    let bad = ChannelRequest {
        channel: 3,
        ..ChannelRequest::default()
    };
    let err = lessons::extract_channels(&input, &bad, &mut viewer, 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ImageError>(),
        Some(ImageError::IndexOutOfRange { axis: Axis::Channel, .. })
    ));
}

#[test]
fn test_roi_and_color_lesson() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let crop = Rect::new(100, 300, 200, 400);
    let paste = Rect::new(50, 250, 150, 350);
    let outcome = lessons::roi_and_color(
        &input,
        &crop,
        &paste,
        ConversionMode::Bgr2Gray,
        &mut viewer,
        0,
    )
    .unwrap();

    assert_eq!(outcome.converted.shape(), (480, 640, 1));
    assert_eq!(outcome.roi.shape(), (200, 200, 3));
    assert_eq!(outcome.pasted.shape(), (480, 640, 3));
    assert_eq!(outcome.pasted.crop(&paste).unwrap(), outcome.roi);

    for title in ["color", "gray", "roi_img", "paste_img"] {
        assert!(viewer.snapshot_path(title).exists(), "missing window {}", title);
    }
    assert!(viewer.open_windows().is_empty());
}

#[test]
fn test_roi_rejects_mismatched_paste() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());
    let mut viewer = SnapshotViewer::new(dir.path().join("windows"));

    let err = lessons::roi_and_color(
        &input,
        &Rect::new(0, 10, 0, 10),
        &Rect::new(0, 20, 0, 20),
        ConversionMode::Bgr2Rgb,
        &mut viewer,
        0,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ImageError>(),
        Some(ImageError::DimensionMismatch { .. })
    ));
    // windows opened before the failure are closed again
    assert!(viewer.open_windows().is_empty());
}

#[test]
fn test_convert_file() {
    let dir = tempdir().unwrap();
    let input = create_test_picture(dir.path());

    let output = dir.path().join("hsv.png");
    let hsv = lessons::convert_file(&input, ConversionMode::Bgr2Hsv, &output).unwrap();
    assert_eq!(hsv.layout(), ChannelLayout::Hsv);
    assert_eq!(load_image(&output, ReadMode::Color).unwrap().as_raw(), hsv.as_raw());

    let gray_output = dir.path().join("gray.png");
    lessons::convert_file(&input, ConversionMode::Bgr2Gray, &gray_output).unwrap();
    let bgr_output = dir.path().join("bgr.png");
    let bgr = lessons::convert_file(&gray_output, ConversionMode::Gray2Bgr, &bgr_output).unwrap();
    assert_eq!(bgr.shape(), (480, 640, 3));
    let px = bgr.pixel(5, 5).unwrap();
    assert!(px[0] == px[1] && px[1] == px[2]);
}

#[test]
fn test_snapshot_viewer_as_trait_object() {
    let dir = tempdir().unwrap();
    let mut viewer: Box<dyn Viewer> = Box::new(SnapshotViewer::new(dir.path()));
    let image = PixelArray::new(4, 4, ChannelLayout::Bgr);

    viewer.show("Gray Scale", &image).unwrap();
    assert_eq!(viewer.wait_key(0).unwrap(), None);
    viewer.destroy_all_windows().unwrap();
    assert!(dir.path().join("gray_scale.png").exists());
}
