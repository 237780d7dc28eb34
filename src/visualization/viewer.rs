use crate::pixel::PixelArray;
use crate::Result;

/// An on-screen (or stand-in) window system
pub trait Viewer {
    fn name(&self) -> &str;

    /// Render `image` into the window called `title`, creating it if needed
    fn show(&mut self, title: &str, image: &PixelArray) -> Result<()>;

    /// Block for a key press, or at most `delay_ms` when non-zero.
    /// Returns the key code, or `None` on timeout.
    fn wait_key(&mut self, delay_ms: u32) -> Result<Option<i32>>;

    fn destroy_all_windows(&mut self) -> Result<()>;
}

/// Windows opened during one lesson run.
///
/// [`WindowSession::finish`] waits for a key and closes every window. If the
/// session is dropped without finishing (for example on an error path), the
/// windows are still closed.
pub struct WindowSession<'a> {
    viewer: &'a mut dyn Viewer,
    delay_ms: u32,
    shown: Vec<String>,
    closed: bool,
}

impl<'a> WindowSession<'a> {
    pub fn new(viewer: &'a mut dyn Viewer, delay_ms: u32) -> Self {
        Self {
            viewer,
            delay_ms,
            shown: Vec::new(),
            closed: false,
        }
    }

    pub fn show(&mut self, title: &str, image: &PixelArray) -> Result<()> {
        tracing::info!(
            viewer = self.viewer.name(),
            window = title,
            shape = ?image.shape(),
            "Showing window"
        );
        self.viewer.show(title, image)?;
        if !self.shown.iter().any(|t| t == title) {
            self.shown.push(title.to_string());
        }
        Ok(())
    }

    /// Distinct window titles shown so far
    pub fn windows(&self) -> &[String] {
        &self.shown
    }

    /// Wait for a key press, then close all windows
    pub fn finish(mut self) -> Result<Option<i32>> {
        let key = self.viewer.wait_key(self.delay_ms)?;
        tracing::debug!(key = ?key, "Wait for key returned");
        self.closed = true;
        self.viewer.destroy_all_windows()?;
        Ok(key)
    }
}

impl Drop for WindowSession<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.viewer.destroy_all_windows() {
            tracing::warn!("Failed to close windows: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::ChannelLayout;

    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<String>,
        waits: Vec<u32>,
        destroyed: usize,
    }

    impl Viewer for RecordingViewer {
        fn name(&self) -> &str {
            "recording"
        }

        fn show(&mut self, title: &str, _image: &PixelArray) -> Result<()> {
            self.shown.push(title.to_string());
            Ok(())
        }

        fn wait_key(&mut self, delay_ms: u32) -> Result<Option<i32>> {
            self.waits.push(delay_ms);
            Ok(Some(27))
        }

        fn destroy_all_windows(&mut self) -> Result<()> {
            self.destroyed += 1;
            Ok(())
        }
    }

    #[test]
    fn test_finish_waits_then_closes() {
        let mut viewer = RecordingViewer::default();
        let image = PixelArray::new(2, 2, ChannelLayout::Bgr);
        {
            let mut session = WindowSession::new(&mut viewer, 0);
            session.show("color", &image).unwrap();
            session.show("color", &image).unwrap();
            session.show("gray", &image).unwrap();
            assert_eq!(session.windows(), ["color", "gray"]);
            assert_eq!(session.finish().unwrap(), Some(27));
        }
        assert_eq!(viewer.shown.len(), 3);
        assert_eq!(viewer.waits, vec![0]);
        assert_eq!(viewer.destroyed, 1);
    }

    #[test]
    fn test_drop_closes_windows() {
        let mut viewer = RecordingViewer::default();
        {
            let mut session = WindowSession::new(&mut viewer, 500);
            session
                .show("roi", &PixelArray::new(1, 1, ChannelLayout::Gray))
                .unwrap();
        }
        assert!(viewer.waits.is_empty());
        assert_eq!(viewer.destroyed, 1);
    }
}
