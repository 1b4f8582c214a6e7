//! What goes into a launcher shortcut

use crate::launcher::{LaunchRequest, working_dir_for};
use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix that marks shortcuts created by this tool
pub const SHORTCUT_SUFFIX: &str = " - LOP";

/// Icon resource: a file and the index of the icon inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLocation {
    /// Executable or icon file
    pub path: PathBuf,
    /// 0-based icon index
    pub index: i32,
}

impl fmt::Display for IconLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.path.display(), self.index)
    }
}

/// Everything needed to write a `.lnk` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    /// File name without the `.lnk` extension
    pub name: String,
    /// Program the shortcut runs (this launcher)
    pub target: PathBuf,
    /// Command line passed to `target`
    pub arguments: String,
    /// Start-in directory
    pub working_dir: PathBuf,
    /// Icon shown on the desktop
    pub icon_location: Option<IconLocation>,
}

impl ShortcutSpec {
    /// Shortcut that runs `launcher_exe` headlessly with `request`
    ///
    /// The shortcut carries the target program's name and first icon so it
    /// looks like the program itself on the desktop.
    pub fn for_launch(launcher_exe: &Path, request: &LaunchRequest) -> Self {
        let arguments = launcher_arguments(
            &request.exe_path,
            request.monitor_index,
            request.mode.as_str(),
            request.observe_secs,
        );
        Self {
            name: shortcut_name_for(&request.exe_path),
            target: launcher_exe.to_path_buf(),
            arguments: join_arguments(&arguments),
            working_dir: working_dir_for(&request.exe_path),
            icon_location: Some(IconLocation {
                path: request.exe_path.clone(),
                index: 0,
            }),
        }
    }

    /// `{name}.lnk`
    pub fn file_name(&self) -> String {
        format!("{}.lnk", self.name)
    }
}

/// File name of `path` without its last extension, keeping its case
///
/// Both `\` and `/` count as separators so Windows paths behave the same on
/// every host.
fn file_stem(path: &Path) -> String {
    let text = path.to_string_lossy();
    let name = text.rsplit(['\\', '/']).next().unwrap_or(&text);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}

/// `"{stem} - LOP"` for the program at `exe_path`
pub fn shortcut_name_for(exe_path: &Path) -> String {
    format!("{}{}", file_stem(exe_path), SHORTCUT_SUFFIX)
}

/// Headless command line for a launch
pub fn launcher_arguments(
    exe_path: &Path,
    monitor_index: usize,
    mode: &str,
    observe_secs: u32,
) -> Vec<String> {
    vec![
        "--exe".to_string(),
        exe_path.to_string_lossy().into_owned(),
        "--monitor".to_string(),
        monitor_index.to_string(),
        "--mode".to_string(),
        mode.to_string(),
        "--observe".to_string(),
        observe_secs.to_string(),
    ]
}

/// Join arguments with single spaces, quoting those that contain a space
pub fn join_arguments<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if arg.contains(' ') {
                format!("\"{arg}\"")
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
