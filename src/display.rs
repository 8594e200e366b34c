//! Interactive display of the chart.
//!
//! plotters draws to files only, so the chart is rendered to a temporary svg
//! that is handed to an external viewer. The call blocks until the user
//! presses Enter (or stdin is closed), then the temporary file is removed.
//! On Ctrl-C the interrupt handler removes it through `discard_pending`.

use super::{RenderError, Series};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempPath;

pub const PROMPT: &str = "close the plot and press Enter to exit";

/// svg currently shown, deleted on drop
static PENDING: Mutex<Option<TempPath>> = Mutex::new(None);

fn keep_pending(svg: TempPath) -> PathBuf {
    let path = svg.to_path_buf();
    if let Ok(mut pending) = PENDING.lock() {
        *pending = Some(svg);
    }
    path
}

/// Removes the svg being shown, if any.
pub fn discard_pending() {
    if let Ok(mut pending) = PENDING.lock() {
        pending.take();
    }
}

/// Renders the series, opens it with `viewer` and waits on stdin.
pub fn show(series: &Series, viewer: &str) -> Result<(), RenderError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    show_with(series, viewer, &mut stdin.lock(), &mut stdout.lock())
}

/// Same as `show`, reading the confirmation from `input` and prompting on `output`.
pub fn show_with<R: BufRead, W: Write>(
    series: &Series,
    viewer: &str,
    input: &mut R,
    output: &mut W,
) -> Result<(), RenderError> {
    let svg = tempfile::Builder::new()
        .prefix("channel_plot_")
        .suffix(".svg")
        .tempfile()?
        .into_temp_path();
    let svg = keep_pending(svg);
    let shown = prompt_viewer(series, viewer, &svg, input, output);
    discard_pending();
    shown
}

fn prompt_viewer<R: BufRead, W: Write>(
    series: &Series,
    viewer: &str,
    svg: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<(), RenderError> {
    series.plot_svg(svg)?;
    debug!("rendered {} to {}", series.title(), svg.display());
    open_viewer(viewer, svg)?;
    writeln!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    info!("plot closed");
    Ok(())
}

/// Runs the viewer on the file and waits for the command to return.
/// Most viewers (xdg-open, open) detach and return immediately.
pub fn open_viewer(viewer: &str, file: &Path) -> Result<(), RenderError> {
    debug!("opening {} with {}", file.display(), viewer);
    let status = Command::new(viewer)
        .arg(file)
        .status()
        .map_err(|source| RenderError::Viewer {
            viewer: viewer.to_string(),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(RenderError::ViewerStatus {
            viewer: viewer.to_string(),
            status,
        })
    }
}
