use crate::color::kernels::bgr_to_gray;
use crate::error::ImageError;
use crate::logging::OperationSpan;
use crate::pixel::{ChannelLayout, PixelArray};
use crate::Result;
use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the loader shapes the decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Always 3-channel BGR; alpha is discarded
    #[default]
    Color,
    /// Single channel
    Grayscale,
    /// Keep the source's channels, including alpha
    Unchanged,
}

impl ReadMode {
    /// Classic integer flags: 1 = color, 0 = grayscale, -1 = unchanged
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            1 => Some(ReadMode::Color),
            0 => Some(ReadMode::Grayscale),
            -1 => Some(ReadMode::Unchanged),
            _ => None,
        }
    }

    pub fn flag(self) -> i32 {
        match self {
            ReadMode::Color => 1,
            ReadMode::Grayscale => 0,
            ReadMode::Unchanged => -1,
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadMode::Color => write!(f, "color"),
            ReadMode::Grayscale => write!(f, "grayscale"),
            ReadMode::Unchanged => write!(f, "unchanged"),
        }
    }
}

impl FromStr for ReadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" | "1" => Ok(ReadMode::Color),
            "gray" | "grey" | "grayscale" | "0" => Ok(ReadMode::Grayscale),
            "unchanged" | "alpha" | "-1" => Ok(ReadMode::Unchanged),
            other => Err(format!("unknown read mode: {}", other)),
        }
    }
}

/// Decode an image file into a pixel array.
///
/// The format is detected from the file contents, not the extension.
pub fn load_image<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<PixelArray> {
    let path = path.as_ref();
    let span = OperationSpan::new("load");
    let _enter = span.enter();

    if !path.exists() {
        return Err(ImageError::FileNotFound(path.to_path_buf()));
    }

    let decode_err = |source: image::ImageError| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    let array = from_dynamic(&img, mode)?;
    tracing::debug!(
        path = %path.display(),
        mode = %mode,
        source_color = ?img.color(),
        "Decoded image"
    );

    span.complete(array.shape());
    Ok(array)
}

/// Shape a decoded image according to `mode`
pub fn from_dynamic(img: &DynamicImage, mode: ReadMode) -> Result<PixelArray> {
    let color = img.color();
    match mode {
        ReadMode::Color => bgr_from(img),
        ReadMode::Grayscale => {
            if color.has_color() {
                gray_from_color(img)
            } else {
                gray_from_luma(img)
            }
        }
        ReadMode::Unchanged => {
            if color.has_alpha() {
                bgra_from(img)
            } else if color.has_color() {
                bgr_from(img)
            } else {
                gray_from_luma(img)
            }
        }
    }
}

fn bgr_from(img: &DynamicImage) -> Result<PixelArray> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut samples = rgb.into_raw();
    for px in samples.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    PixelArray::from_raw(height as usize, width as usize, ChannelLayout::Bgr, samples)
}

fn bgra_from(img: &DynamicImage) -> Result<PixelArray> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut samples = rgba.into_raw();
    for px in samples.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    PixelArray::from_raw(height as usize, width as usize, ChannelLayout::Bgra, samples)
}

fn gray_from_luma(img: &DynamicImage) -> Result<PixelArray> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    PixelArray::from_raw(
        height as usize,
        width as usize,
        ChannelLayout::Gray,
        luma.into_raw(),
    )
}

fn gray_from_color(img: &DynamicImage) -> Result<PixelArray> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let samples = rgb
        .as_raw()
        .chunks_exact(3)
        .map(|px| bgr_to_gray(px[2], px[1], px[0]))
        .collect();
    PixelArray::from_raw(height as usize, width as usize, ChannelLayout::Gray, samples)
}
