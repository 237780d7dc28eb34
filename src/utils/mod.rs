#[cfg(feature = "opencv")]
pub mod image_conversion;

#[cfg(feature = "opencv")]
pub use image_conversion::*;
