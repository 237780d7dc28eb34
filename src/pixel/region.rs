//! Rectangular regions of interest: crop and paste

use super::index::check_range;
use super::PixelArray;
use crate::error::{Axis, ImageError};
use crate::logging::OperationSpan;
use crate::Result;
use ndarray::s;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Half-open rectangle `rows x cols` in pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rect {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Rect {
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            rows: row_start..row_end,
            cols: col_start..col_end,
        }
    }

    pub fn from_ranges(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    pub fn height(&self) -> usize {
        self.rows.end.saturating_sub(self.rows.start)
    }

    pub fn width(&self) -> usize {
        self.cols.end.saturating_sub(self.cols.start)
    }

    fn check_within(&self, array: &PixelArray) -> Result<()> {
        check_range(Axis::Row, &self.rows, array.height())?;
        check_range(Axis::Column, &self.cols, array.width())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.rows.start, self.rows.end, self.cols.start, self.cols.end
        )
    }
}

/// Parses `row_start,row_end,col_start,col_end`
impl FromStr for Rect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid rectangle '{}': {}", s, e))?;

        match parts.as_slice() {
            [r0, r1, c0, c1] => Ok(Rect::new(*r0, *r1, *c0, *c1)),
            _ => Err(format!(
                "invalid rectangle '{}': expected row_start,row_end,col_start,col_end",
                s
            )),
        }
    }
}

impl TryFrom<String> for Rect {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rect> for String {
    fn from(rect: Rect) -> Self {
        rect.to_string()
    }
}

impl PixelArray {
    /// Copy the rectangle out into a new array with the same layout
    pub fn crop(&self, rect: &Rect) -> Result<PixelArray> {
        let span = OperationSpan::new("crop");
        let _enter = span.enter();

        rect.check_within(self)?;
        let data = self
            .data
            .slice(s![rect.rows.clone(), rect.cols.clone(), ..])
            .to_owned();
        let cropped = PixelArray::from_array(data, self.layout)?;

        span.complete(cropped.shape());
        Ok(cropped)
    }

    /// Overwrite the rectangle in place with `roi`.
    ///
    /// `roi` must be exactly `rect.height() x rect.width()` with the same
    /// channel count; otherwise nothing is written.
    pub fn paste(&mut self, rect: &Rect, roi: &PixelArray) -> Result<()> {
        let span = OperationSpan::new("paste");
        let _enter = span.enter();

        rect.check_within(self)?;
        let expected = (rect.height(), rect.width(), self.channels());
        let found = roi.shape();
        if expected != found {
            return Err(ImageError::DimensionMismatch { expected, found });
        }

        self.data
            .slice_mut(s![rect.rows.clone(), rect.cols.clone(), ..])
            .assign(&roi.data);

        span.complete(found);
        Ok(())
    }
}
