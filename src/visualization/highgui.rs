use super::viewer::Viewer;
use crate::pixel::PixelArray;
use crate::utils::pixel_array_to_mat;
use crate::Result;
use opencv::highgui;

/// OpenCV highgui windows.
///
/// Samples are shown as-is, so BGR arrays render with their true colors and
/// RGB or HSV arrays render with their channels read as BGR.
#[derive(Default)]
pub struct HighGuiViewer {
    windows: Vec<String>,
}

impl HighGuiViewer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Viewer for HighGuiViewer {
    fn name(&self) -> &str {
        "highgui"
    }

    fn show(&mut self, title: &str, image: &PixelArray) -> Result<()> {
        let mat = pixel_array_to_mat(image)?;
        if !self.windows.iter().any(|t| t == title) {
            highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
            self.windows.push(title.to_string());
        }
        highgui::imshow(title, &mat)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: u32) -> Result<Option<i32>> {
        let key = highgui::wait_key(delay_ms as i32)?;
        Ok(if key < 0 { None } else { Some(key) })
    }

    fn destroy_all_windows(&mut self) -> Result<()> {
        highgui::destroy_all_windows()?;
        self.windows.clear();
        Ok(())
    }
}
