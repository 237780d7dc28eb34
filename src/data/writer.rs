use crate::error::ImageError;
use crate::logging::OperationSpan;
use crate::pixel::{ChannelLayout, PixelArray};
use crate::Result;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// Encode `array` to `path`; the extension selects the format.
///
/// BGR(A) samples are swapped back to RGB(A) for the encoder. HSV arrays are
/// written as raw samples, interpreted as BGR. Alpha is dropped for formats
/// that cannot store it.
pub fn write_image<P: AsRef<Path>>(path: P, array: &PixelArray) -> Result<()> {
    let path = path.as_ref();
    let span = OperationSpan::new("write");
    let _enter = span.enter();

    let format =
        ImageFormat::from_path(path).map_err(|_| ImageError::UnsupportedFormat(path.to_path_buf()))?;

    let mut img = to_dynamic(array)?;
    if img.color().has_alpha() && !supports_alpha(format) {
        img = DynamicImage::ImageRgb8(img.to_rgb8());
    }

    img.save_with_format(path, format).map_err(|e| match e {
        image::ImageError::IoError(io) => ImageError::Io(io),
        other => ImageError::Encode {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    tracing::debug!(path = %path.display(), format = ?format, "Wrote image");
    span.complete(array.shape());
    Ok(())
}

/// Convert a pixel array to an `image` buffer in RGB(A) order
pub fn to_dynamic(array: &PixelArray) -> Result<DynamicImage> {
    let (height, width, _) = array.shape();
    let (width, height) = (width as u32, height as u32);
    let shape_err = || ImageError::DimensionMismatch {
        expected: (height as usize, width as usize, array.layout().channels()),
        found: array.shape(),
    };

    let img = match array.layout() {
        ChannelLayout::Gray => {
            let buf = GrayImage::from_raw(width, height, array.as_raw().to_vec())
                .ok_or_else(shape_err)?;
            DynamicImage::ImageLuma8(buf)
        }
        ChannelLayout::Rgb => {
            let buf =
                RgbImage::from_raw(width, height, array.as_raw().to_vec()).ok_or_else(shape_err)?;
            DynamicImage::ImageRgb8(buf)
        }
        ChannelLayout::Bgr | ChannelLayout::Hsv => {
            let buf = RgbImage::from_raw(width, height, swapped(array.as_raw(), 3))
                .ok_or_else(shape_err)?;
            DynamicImage::ImageRgb8(buf)
        }
        ChannelLayout::Bgra => {
            let buf = RgbaImage::from_raw(width, height, swapped(array.as_raw(), 4))
                .ok_or_else(shape_err)?;
            DynamicImage::ImageRgba8(buf)
        }
    };

    Ok(img)
}

fn swapped(samples: &[u8], channels: usize) -> Vec<u8> {
    let mut out = samples.to_vec();
    for px in out.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
    out
}

fn supports_alpha(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Tiff
            | ImageFormat::Tga
            | ImageFormat::WebP
            | ImageFormat::Qoi
            | ImageFormat::Ico
    )
}
