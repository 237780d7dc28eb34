pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod lessons;
pub mod logging;
pub mod pixel;
pub mod utils;
pub mod visualization;

pub use color::{convert_color, convert_color_named, ConversionMode};
pub use data::*;
pub use error::{Axis, ImageError};
pub use pixel::*;

pub type Result<T> = std::result::Result<T, ImageError>;

