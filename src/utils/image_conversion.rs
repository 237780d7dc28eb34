use crate::error::ImageError;
use crate::pixel::{ChannelLayout, PixelArray};
use crate::Result;
use opencv::core::{Mat, Scalar, CV_8UC1, CV_8UC3, CV_8UC4};
use opencv::prelude::*;

/// Copy a pixel array into a new 8-bit OpenCV Mat with the same channel count
pub fn pixel_array_to_mat(image: &PixelArray) -> Result<Mat> {
    let (height, width, channels) = image.shape();
    let typ = match channels {
        1 => CV_8UC1,
        3 => CV_8UC3,
        4 => CV_8UC4,
        other => {
            return Err(ImageError::Display(format!(
                "cannot build a Mat from {} channels",
                other
            )))
        }
    };

    let mut mat =
        Mat::new_rows_cols_with_default(height as i32, width as i32, typ, Scalar::all(0.0))?;
    mat.data_bytes_mut()?.copy_from_slice(image.as_raw());
    Ok(mat)
}

/// Copy an 8-bit OpenCV Mat (1, 3 or 4 channels) into a pixel array
pub fn mat_to_pixel_array(mat: &Mat) -> Result<PixelArray> {
    let layout = match mat.channels() {
        1 => ChannelLayout::Gray,
        3 => ChannelLayout::Bgr,
        4 => ChannelLayout::Bgra,
        other => {
            return Err(ImageError::Display(format!(
                "unsupported Mat channel count: {}",
                other
            )))
        }
    };

    let continuous;
    let mat = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone()?;
        &continuous
    };

    PixelArray::from_raw(
        mat.rows() as usize,
        mat.cols() as usize,
        layout,
        mat.data_bytes()?.to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat_roundtrip_keeps_samples() {
        let image = PixelArray::from_fn(5, 7, ChannelLayout::Bgr, |r, c, ch| (r * 30 + c * 3 + ch) as u8);
        let mat = pixel_array_to_mat(&image).unwrap();
        assert_eq!(mat.rows(), 5);
        assert_eq!(mat.cols(), 7);
        assert_eq!(mat.channels(), 3);

        let back = mat_to_pixel_array(&mat).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn test_gray_mat() {
        let image = PixelArray::from_fn(3, 3, ChannelLayout::Gray, |r, c, _| (r * 3 + c) as u8);
        let mat = pixel_array_to_mat(&image).unwrap();
        assert_eq!(*mat.at_2d::<u8>(2, 1).unwrap(), 7);
    }
}
