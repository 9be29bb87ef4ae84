use std::fmt;
use std::path::Path;
use std::process::Command;

/// What happened when the finished sheet was handed to a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    /// Auto-open is turned off.
    Disabled,
    Opened,
    /// The document is saved; only opening it failed.
    Failed { reason: String },
}

impl fmt::Display for ViewerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerStatus::Disabled => f.write_str("viewer disabled"),
            ViewerStatus::Opened => f.write_str("opened in viewer"),
            ViewerStatus::Failed { reason } => write!(f, "could not open viewer: {reason}"),
        }
    }
}

/// Opens a saved document for the user. Never fails the render.
pub trait DocumentViewer: fmt::Debug {
    fn open(&self, path: &Path) -> ViewerStatus;
}

/// Hands the document to the host's default PDF viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl DocumentViewer for SystemViewer {
    fn open(&self, path: &Path) -> ViewerStatus {
        let mut command = Self::command(path);
        let program = command.get_program().to_string_lossy().into_owned();
        match command.status() {
            Ok(status) if status.success() => {
                log::info!("Opened {} with {}", path.display(), program);
                ViewerStatus::Opened
            }
            Ok(status) => ViewerStatus::Failed {
                reason: format!("{program} exited with {status}"),
            },
            Err(e) => ViewerStatus::Failed {
                reason: format!("{program}: {e}"),
            },
        }
    }
}
