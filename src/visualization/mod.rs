pub mod report;
pub mod snapshot;
pub mod viewer;

#[cfg(feature = "opencv")]
pub mod highgui;

pub use report::*;
pub use snapshot::SnapshotViewer;
pub use viewer::{Viewer, WindowSession};

#[cfg(feature = "opencv")]
pub use highgui::HighGuiViewer;

use crate::config::{DisplayBackend, DisplayConfig};
use crate::Result;

/// Build the viewer selected by `config`.
///
/// `Auto` picks highgui when the crate is built with the `opencv` feature and
/// falls back to snapshots otherwise.
pub fn open_viewer(config: &DisplayConfig) -> Result<Box<dyn Viewer>> {
    match config.backend {
        DisplayBackend::Snapshot => Ok(Box::new(SnapshotViewer::new(&config.snapshot_dir))),
        DisplayBackend::HighGui => highgui_viewer(),
        DisplayBackend::Auto => {
            if cfg!(feature = "opencv") {
                highgui_viewer()
            } else {
                tracing::info!(
                    "Built without OpenCV; writing windows to {}",
                    config.snapshot_dir.display()
                );
                Ok(Box::new(SnapshotViewer::new(&config.snapshot_dir)))
            }
        }
    }
}

#[cfg(feature = "opencv")]
fn highgui_viewer() -> Result<Box<dyn Viewer>> {
    Ok(Box::new(HighGuiViewer::new()))
}

#[cfg(not(feature = "opencv"))]
fn highgui_viewer() -> Result<Box<dyn Viewer>> {
    Err(crate::error::ImageError::Display(
        "highgui backend requires building with the `opencv` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_snapshot_backend() {
        let config = DisplayConfig {
            backend: DisplayBackend::Snapshot,
            snapshot_dir: PathBuf::from("windows"),
            wait_delay_ms: 0,
        };
        let viewer = open_viewer(&config).unwrap();
        assert_eq!(viewer.name(), "snapshot");
    }

    #[cfg(not(feature = "opencv"))]
    #[test]
    fn test_highgui_requires_feature() {
        use crate::error::ImageError;

        let config = DisplayConfig {
            backend: DisplayBackend::HighGui,
            ..DisplayConfig::default()
        };
        assert!(matches!(open_viewer(&config), Err(ImageError::Display(_))));

        let auto = DisplayConfig::default();
        assert_eq!(open_viewer(&auto).unwrap().name(), "snapshot");
    }
}
