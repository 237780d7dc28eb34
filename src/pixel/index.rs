//! Pixel, line and channel-plane extraction

use super::{ChannelLayout, PixelArray};
use crate::error::{Axis, ImageError};
use crate::Result;
use ndarray::{s, Array1, Array2, Axis as NdAxis};
use std::ops::{Range, RangeFull};

/// Selection along the row or column axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisSelect {
    Index(usize),
    Range(Range<usize>),
    All,
}

impl From<usize> for AxisSelect {
    fn from(index: usize) -> Self {
        AxisSelect::Index(index)
    }
}

impl From<Range<usize>> for AxisSelect {
    fn from(range: Range<usize>) -> Self {
        AxisSelect::Range(range)
    }
}

impl From<RangeFull> for AxisSelect {
    fn from(_: RangeFull) -> Self {
        AxisSelect::All
    }
}

/// Result of [`PixelArray::extract`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Single sample: both axes were indices
    Sample(u8),
    /// One axis was an index, the other a range
    Line(Array1<u8>),
    /// Both axes were ranges
    Plane(Array2<u8>),
}

impl Extracted {
    pub fn as_sample(&self) -> Option<u8> {
        match self {
            Extracted::Sample(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_plane(self) -> Option<Array2<u8>> {
        match self {
            Extracted::Plane(plane) => Some(plane),
            _ => None,
        }
    }
}

enum Resolved {
    Index(usize),
    Span(Range<usize>),
}

fn resolve(select: AxisSelect, axis: Axis, len: usize) -> Result<Resolved> {
    match select {
        AxisSelect::Index(index) => {
            check_index(axis, index, len)?;
            Ok(Resolved::Index(index))
        }
        AxisSelect::Range(range) => {
            check_range(axis, &range, len)?;
            Ok(Resolved::Span(range))
        }
        AxisSelect::All => Ok(Resolved::Span(0..len)),
    }
}

pub(crate) fn check_index(axis: Axis, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ImageError::IndexOutOfRange { axis, index, len });
    }
    Ok(())
}

/// Ranges must be non-empty and end within `len`
pub(crate) fn check_range(axis: Axis, range: &Range<usize>, len: usize) -> Result<()> {
    if range.end > len {
        return Err(ImageError::IndexOutOfRange {
            axis,
            index: range.end,
            len,
        });
    }
    if range.start >= range.end {
        return Err(ImageError::IndexOutOfRange {
            axis,
            index: range.start,
            len: range.end,
        });
    }
    Ok(())
}

impl PixelArray {
    /// Index by row, column and channel.
    ///
    /// Each of `rows` and `cols` may be an index (`187`), a half-open range
    /// (`100..200`) or the full axis (`..`). Two indices give a single sample,
    /// one index gives a line and two ranges give a 2-D plane of the channel.
    pub fn extract(
        &self,
        rows: impl Into<AxisSelect>,
        cols: impl Into<AxisSelect>,
        channel: usize,
    ) -> Result<Extracted> {
        let (height, width, channels) = self.shape();
        check_index(Axis::Channel, channel, channels)?;
        let rows = resolve(rows.into(), Axis::Row, height)?;
        let cols = resolve(cols.into(), Axis::Column, width)?;

        let plane = self.data.index_axis(NdAxis(2), channel);
        let extracted = match (rows, cols) {
            (Resolved::Index(r), Resolved::Index(c)) => Extracted::Sample(plane[[r, c]]),
            (Resolved::Index(r), Resolved::Span(cs)) => {
                Extracted::Line(plane.slice(s![r, cs]).to_owned())
            }
            (Resolved::Span(rs), Resolved::Index(c)) => {
                Extracted::Line(plane.slice(s![rs, c]).to_owned())
            }
            (Resolved::Span(rs), Resolved::Span(cs)) => {
                Extracted::Plane(plane.slice(s![rs, cs]).to_owned())
            }
        };

        Ok(extracted)
    }

    /// Single sample at (row, col, channel)
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> Result<u8> {
        let (height, width, channels) = self.shape();
        check_index(Axis::Row, row, height)?;
        check_index(Axis::Column, col, width)?;
        check_index(Axis::Channel, channel, channels)?;
        Ok(self.data[[row, col, channel]])
    }

    /// All channel samples at (row, col)
    pub fn pixel(&self, row: usize, col: usize) -> Result<Vec<u8>> {
        check_index(Axis::Row, row, self.height())?;
        check_index(Axis::Column, col, self.width())?;
        Ok(self.data.slice(s![row, col, ..]).to_vec())
    }

    /// Whole channel plane as a grayscale array
    pub fn channel_plane(&self, channel: usize) -> Result<PixelArray> {
        check_index(Axis::Channel, channel, self.channels())?;
        let plane = self.data.index_axis(NdAxis(2), channel).to_owned();
        let array = PixelArray::from_plane(plane);
        debug_assert_eq!(array.layout(), ChannelLayout::Gray);
        Ok(array)
    }
}
