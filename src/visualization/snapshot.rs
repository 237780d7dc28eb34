use super::viewer::Viewer;
use crate::data::write_image;
use crate::pixel::PixelArray;
use crate::Result;
use std::path::{Path, PathBuf};

/// Headless viewer that writes each window to `<dir>/<title>.png`.
///
/// Showing the same title again overwrites its file. `wait_key` returns
/// immediately.
pub struct SnapshotViewer {
    dir: PathBuf,
    snapshots: Vec<PathBuf>,
    open_windows: Vec<String>,
}

impl SnapshotViewer {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            snapshots: Vec::new(),
            open_windows: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, one per distinct window title
    pub fn snapshots(&self) -> &[PathBuf] {
        &self.snapshots
    }

    pub fn open_windows(&self) -> &[String] {
        &self.open_windows
    }

    pub fn snapshot_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.png", sanitize_title(title)))
    }
}

impl Viewer for SnapshotViewer {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn show(&mut self, title: &str, image: &PixelArray) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.snapshot_path(title);
        write_image(&path, image)?;

        if !self.snapshots.contains(&path) {
            self.snapshots.push(path);
        }
        if !self.open_windows.iter().any(|t| t == title) {
            self.open_windows.push(title.to_string());
        }
        Ok(())
    }

    fn wait_key(&mut self, _delay_ms: u32) -> Result<Option<i32>> {
        Ok(None)
    }

    fn destroy_all_windows(&mut self) -> Result<()> {
        self.open_windows.clear();
        Ok(())
    }
}

fn sanitize_title(title: &str) -> String {
    let name: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        "window".to_string()
    } else {
        name
    }
}
