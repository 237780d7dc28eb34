//! The three lessons as explicit entry points: load, transform, then
//! display and/or save.
//!
//! Each run opens a [`WindowSession`], waits for a key at the end and closes
//! every window it opened.

use crate::color::{convert_color, ConversionMode};
use crate::data::{load_image, write_image, ReadMode};
use crate::logging::{self, LessonSpan};
use crate::pixel::{AxisSelect, Extracted, PixelArray, Rect};
use crate::visualization::{Viewer, WindowSession};
use anyhow::{Context, Result};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Files written by [`read_write`]
#[derive(Debug, Clone)]
pub struct ReadWriteOutputs {
    pub color: PathBuf,
    pub gray: PathBuf,
    pub alpha: PathBuf,
}

/// Load `input` in color, grayscale and unchanged mode; show and write each.
pub fn read_write(
    input: &Path,
    output_dir: &Path,
    viewer: &mut dyn Viewer,
    wait_delay_ms: u32,
) -> Result<ReadWriteOutputs> {
    let lesson = LessonSpan::new("read_write", logging::new_correlation_id());
    let _enter = lesson.enter();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut session = WindowSession::new(viewer, wait_delay_ms);
    let mut written = Vec::with_capacity(3);

    for (mode, title, file_name) in [
        (ReadMode::Color, "Color", "color.jpg"),
        (ReadMode::Grayscale, "Gray Scale", "gray_scale.jpg"),
        (ReadMode::Unchanged, "Alpha", "alpha.jpg"),
    ] {
        let image = load_image(input, mode)
            .with_context(|| format!("Failed to load {} as {}", input.display(), mode))?;
        lesson.record_step("load", &format!("{} -> {:?}", mode, image.shape()));

        session.show(title, &image)?;

        let output = output_dir.join(file_name);
        write_image(&output, &image)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        lesson.record_step("write", &output.display().to_string());
        written.push(output);
    }

    let windows = session.windows().len();
    session.finish()?;
    lesson.record_completion(windows);

    let [color, gray, alpha]: [PathBuf; 3] = written
        .try_into()
        .map_err(|_| anyhow::anyhow!("read/write lesson did not produce three outputs"))?;
    Ok(ReadWriteOutputs { color, gray, alpha })
}

/// Which pixel to sample and which part of the channel plane to show
#[derive(Debug, Clone)]
pub struct ChannelRequest {
    pub row: usize,
    pub col: usize,
    pub channel: usize,
    /// Rows of the displayed plane; `None` shows every row
    pub rows: Option<Range<usize>>,
    /// Columns of the displayed plane; `None` shows every column
    pub cols: Option<Range<usize>>,
}

impl Default for ChannelRequest {
    fn default() -> Self {
        Self {
            row: 187,
            col: 332,
            channel: 0,
            rows: None,
            cols: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChannelReport {
    /// Every channel sample at (row, col), in array order (B, G, R for color)
    pub samples: Vec<u8>,
    /// The displayed channel plane
    pub plane: PixelArray,
}

/// Sample one pixel and show one channel plane of `input` loaded in color.
pub fn extract_channels(
    input: &Path,
    request: &ChannelRequest,
    viewer: &mut dyn Viewer,
    wait_delay_ms: u32,
) -> Result<ChannelReport> {
    let lesson = LessonSpan::new("extract_channels", logging::new_correlation_id());
    let _enter = lesson.enter();

    let image = load_image(input, ReadMode::Color)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let mut samples = Vec::with_capacity(image.channels());
    for channel in 0..image.channels() {
        let value = image
            .extract(request.row, request.col, channel)?
            .as_sample()
            .context("Index selection did not produce a sample")?;
        samples.push(value);
    }
    lesson.record_step(
        "sample",
        &format!("({}, {}) -> {:?}", request.row, request.col, samples),
    );

    let rows = request.rows.clone().map_or(AxisSelect::All, AxisSelect::from);
    let cols = request.cols.clone().map_or(AxisSelect::All, AxisSelect::from);
    let plane = match image.extract(rows, cols, request.channel)? {
        Extracted::Plane(plane) => PixelArray::from_plane(plane),
        other => anyhow::bail!("Range selection produced {:?}", other),
    };
    lesson.record_step("channel", &format!("{} -> {:?}", request.channel, plane.shape()));

    let mut session = WindowSession::new(viewer, wait_delay_ms);
    session.show("Color", &plane)?;
    let windows = session.windows().len();
    session.finish()?;
    lesson.record_completion(windows);

    Ok(ChannelReport { samples, plane })
}

#[derive(Debug, Clone)]
pub struct RoiOutcome {
    pub converted: PixelArray,
    pub roi: PixelArray,
    pub pasted: PixelArray,
}

/// Convert `input` with `mode`, crop `crop`, and paste the crop back at `paste`.
pub fn roi_and_color(
    input: &Path,
    crop: &Rect,
    paste: &Rect,
    mode: ConversionMode,
    viewer: &mut dyn Viewer,
    wait_delay_ms: u32,
) -> Result<RoiOutcome> {
    let lesson = LessonSpan::new("roi_and_color", logging::new_correlation_id());
    let _enter = lesson.enter();

    let mut image = load_image(input, ReadMode::Color)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let mut session = WindowSession::new(viewer, wait_delay_ms);
    session.show("color", &image)?;

    let converted = convert_color(&image, mode)?;
    lesson.record_step("convert", mode.name());
    session.show(&mode.window_title(), &converted)?;

    let roi = image
        .crop(crop)
        .with_context(|| format!("Failed to crop {}", crop))?;
    lesson.record_step("crop", &crop.to_string());
    session.show("roi_img", &roi)?;

    image
        .paste(paste, &roi)
        .with_context(|| format!("Failed to paste at {}", paste))?;
    lesson.record_step("paste", &paste.to_string());
    session.show("paste_img", &image)?;

    let windows = session.windows().len();
    session.finish()?;
    lesson.record_completion(windows);

    Ok(RoiOutcome {
        converted,
        roi,
        pasted: image,
    })
}

/// Load, convert and write in one step
pub fn convert_file(input: &Path, mode: ConversionMode, output: &Path) -> Result<PixelArray> {
    let read_mode = match mode {
        ConversionMode::Gray2Bgr => ReadMode::Grayscale,
        _ => ReadMode::Color,
    };

    let image = load_image(input, read_mode)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let converted = convert_color(&image, mode)?;
    write_image(output, &converted)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        mode = mode.name(),
        "Converted image"
    );
    Ok(converted)
}
