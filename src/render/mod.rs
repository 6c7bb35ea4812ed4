// Word cloud rendering: output spec, renderer trait, raster backend.

pub mod raster;
pub mod spec;
pub mod traits;

use std::path::Path;
use std::process::Command;

use tracing::warn;

/// Open a rendered image in the platform's default viewer.
///
/// Best effort: a missing viewer is logged, never an error, since the image
/// is already on disk by the time this runs.
pub fn show_image(path: &Path) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    if let Err(e) = command.arg(path).spawn() {
        warn!(error = %e, path = %path.display(), "Could not open image viewer");
    }
}
