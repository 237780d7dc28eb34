//! Color-space conversion between BGR, RGB, grayscale and HSV

pub mod kernels;

use crate::error::ImageError;
use crate::logging::OperationSpan;
use crate::pixel::{ChannelLayout, PixelArray};
use crate::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named conversion from one color representation to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConversionMode {
    Bgr2Rgb,
    Rgb2Bgr,
    Bgr2Gray,
    Gray2Bgr,
    Bgr2Hsv,
    Hsv2Bgr,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 6] = [
        ConversionMode::Bgr2Rgb,
        ConversionMode::Rgb2Bgr,
        ConversionMode::Bgr2Gray,
        ConversionMode::Gray2Bgr,
        ConversionMode::Bgr2Hsv,
        ConversionMode::Hsv2Bgr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConversionMode::Bgr2Rgb => "BGR2RGB",
            ConversionMode::Rgb2Bgr => "RGB2BGR",
            ConversionMode::Bgr2Gray => "BGR2GRAY",
            ConversionMode::Gray2Bgr => "GRAY2BGR",
            ConversionMode::Bgr2Hsv => "BGR2HSV",
            ConversionMode::Hsv2Bgr => "HSV2BGR",
        }
    }

    /// Channel counts accepted as input; a fourth (alpha) channel is ignored
    pub fn source_channels(self) -> &'static [usize] {
        match self {
            ConversionMode::Bgr2Rgb
            | ConversionMode::Rgb2Bgr
            | ConversionMode::Bgr2Gray
            | ConversionMode::Bgr2Hsv => &[3, 4],
            ConversionMode::Gray2Bgr => &[1],
            ConversionMode::Hsv2Bgr => &[3],
        }
    }

    /// Window title for the converted image: the target layout, lowercased
    pub fn window_title(self) -> String {
        self.target_layout().name().to_ascii_lowercase()
    }

    pub fn target_layout(self) -> ChannelLayout {
        match self {
            ConversionMode::Bgr2Rgb => ChannelLayout::Rgb,
            ConversionMode::Rgb2Bgr | ConversionMode::Gray2Bgr | ConversionMode::Hsv2Bgr => {
                ChannelLayout::Bgr
            }
            ConversionMode::Bgr2Gray => ChannelLayout::Gray,
            ConversionMode::Bgr2Hsv => ChannelLayout::Hsv,
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `BGR2GRAY`, `bgr2gray` or `COLOR_BGR2GRAY`
impl FromStr for ConversionMode {
    type Err = ImageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("COLOR_").unwrap_or(&upper);
        ConversionMode::ALL
            .into_iter()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| ImageError::UnknownConversionMode(s.to_string()))
    }
}

impl TryFrom<String> for ConversionMode {
    type Error = ImageError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConversionMode> for String {
    fn from(mode: ConversionMode) -> Self {
        mode.name().to_string()
    }
}

/// Convert `src` into a new array in the target representation of `mode`
pub fn convert_color(src: &PixelArray, mode: ConversionMode) -> Result<PixelArray> {
    let span = OperationSpan::new(mode.name());
    let _enter = span.enter();

    let channels = src.channels();
    if !mode.source_channels().contains(&channels) {
        return Err(ImageError::UnsupportedChannels {
            mode: mode.name().to_string(),
            channels,
        });
    }

    let target = mode.target_layout();
    let samples = match mode {
        ConversionMode::Bgr2Rgb | ConversionMode::Rgb2Bgr => {
            map_pixels(src, 3, |px, out| {
                out[0] = px[2];
                out[1] = px[1];
                out[2] = px[0];
            })
        }
        ConversionMode::Bgr2Gray => map_pixels(src, 1, |px, out| {
            out[0] = kernels::bgr_to_gray(px[0], px[1], px[2]);
        }),
        ConversionMode::Gray2Bgr => map_pixels(src, 3, |px, out| {
            out.fill(px[0]);
        }),
        ConversionMode::Bgr2Hsv => map_pixels(src, 3, |px, out| {
            out.copy_from_slice(&kernels::bgr_to_hsv(px[0], px[1], px[2]));
        }),
        ConversionMode::Hsv2Bgr => map_pixels(src, 3, |px, out| {
            out.copy_from_slice(&kernels::hsv_to_bgr(px[0], px[1], px[2]));
        }),
    };

    let converted = PixelArray::from_raw(src.height(), src.width(), target, samples)?;
    span.complete(converted.shape());
    Ok(converted)
}

/// Parse `mode` and convert; unknown names fail with `UnknownConversionMode`
pub fn convert_color_named(src: &PixelArray, mode: &str) -> Result<PixelArray> {
    let mode: ConversionMode = mode.parse()?;
    convert_color(src, mode)
}

fn map_pixels<F>(src: &PixelArray, out_channels: usize, f: F) -> Vec<u8>
where
    F: Fn(&[u8], &mut [u8]) + Sync + Send,
{
    let in_channels = src.channels();
    let mut out = vec![0u8; src.height() * src.width() * out_channels];

    out.par_chunks_mut(out_channels)
        .zip(src.as_raw().par_chunks(in_channels))
        .for_each(|(dst, px)| f(px, dst));

    out
}
