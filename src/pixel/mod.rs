//! In-memory pixel arrays
//!
//! A [`PixelArray`] is a height x width x channel grid of `u8` samples stored
//! row-major with the channel axis last. Color images use blue-green-red(-alpha)
//! order, matching what the loader produces.

pub mod index;
pub mod region;

use crate::error::ImageError;
use crate::Result;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis as NdAxis};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use index::{AxisSelect, Extracted};
pub use region::Rect;

/// Meaning of the channel axis of a [`PixelArray`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelLayout {
    Gray,
    Bgr,
    Bgra,
    Rgb,
    Hsv,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Bgr | ChannelLayout::Rgb | ChannelLayout::Hsv => 3,
            ChannelLayout::Bgra => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelLayout::Gray => "GRAY",
            ChannelLayout::Bgr => "BGR",
            ChannelLayout::Bgra => "BGRA",
            ChannelLayout::Rgb => "RGB",
            ChannelLayout::Hsv => "HSV",
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    data: Array3<u8>,
    layout: ChannelLayout,
}

impl PixelArray {
    /// Create a zero-filled array
    pub fn new(height: usize, width: usize, layout: ChannelLayout) -> Self {
        Self {
            data: Array3::zeros((height, width, layout.channels())),
            layout,
        }
    }

    /// Wrap an existing array, checking that its channel axis fits the layout
    pub fn from_array(data: Array3<u8>, layout: ChannelLayout) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != layout.channels() {
            return Err(ImageError::DimensionMismatch {
                expected: (height, width, layout.channels()),
                found: (height, width, channels),
            });
        }

        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };

        Ok(Self { data, layout })
    }

    /// Build a single-channel grayscale array from a 2-D plane
    pub fn from_plane(plane: Array2<u8>) -> Self {
        let data = plane.insert_axis(NdAxis(2));
        let data = data.as_standard_layout().into_owned();
        Self {
            data,
            layout: ChannelLayout::Gray,
        }
    }

    /// Build an array from raw interleaved samples
    pub fn from_raw(
        height: usize,
        width: usize,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let channels = layout.channels();
        let found_len = samples.len();
        let data = Array3::from_shape_vec((height, width, channels), samples).map_err(|_| {
            ImageError::DimensionMismatch {
                expected: (height, width, channels),
                found: (found_len / (width * channels).max(1), width, channels),
            }
        })?;
        Ok(Self { data, layout })
    }

    /// Build an array by evaluating `f(row, col, channel)` for every sample
    pub fn from_fn<F>(height: usize, width: usize, layout: ChannelLayout, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> u8,
    {
        let data = Array3::from_shape_fn((height, width, layout.channels()), |(r, c, ch)| {
            f(r, c, ch)
        });
        Self { data, layout }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// (height, width, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// 2 for single-channel arrays, 3 otherwise
    pub fn ndim(&self) -> usize {
        if self.channels() == 1 {
            2
        } else {
            3
        }
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    /// 2-D view of a single-channel array
    pub fn as_plane(&self) -> Option<ArrayView2<'_, u8>> {
        if self.channels() == 1 {
            Some(self.data.index_axis(NdAxis(2), 0))
        } else {
            None
        }
    }

    /// Interleaved samples in row-major order
    pub fn as_raw(&self) -> &[u8] {
        self.data.as_slice().unwrap_or_default()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }
}
