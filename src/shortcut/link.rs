//! Writing `.lnk` files on the desktop

use crate::error::Result;
use crate::shortcut::ShortcutSpec;
use std::path::PathBuf;

/// Current user's Desktop folder
///
/// Uses the known-folder API (which follows OneDrive and folder redirection)
/// and falls back to `%USERPROFILE%\Desktop`.
pub fn desktop_dir() -> PathBuf {
    #[cfg(windows)]
    {
        match win32::known_desktop() {
            Ok(path) => return path,
            Err(e) => tracing::warn!("Desktop folder lookup failed, using profile path: {}", e),
        }
    }
    fallback_desktop_dir()
}

fn fallback_desktop_dir() -> PathBuf {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_default()
        .join("Desktop")
}

/// Write `{desktop}\{name}.lnk` and return its path
///
/// An existing shortcut with the same name is overwritten.
#[cfg(windows)]
pub fn create_desktop_shortcut(spec: &ShortcutSpec) -> Result<PathBuf> {
    let path = desktop_dir().join(spec.file_name());
    win32::write_link(spec, &path)?;
    tracing::info!("Created shortcut {}", path.display());
    Ok(path)
}

/// Write `{desktop}\{name}.lnk` (unsupported off Windows)
#[cfg(not(windows))]
pub fn create_desktop_shortcut(_spec: &ShortcutSpec) -> Result<PathBuf> {
    Err(crate::error::LaunchError::PlatformUnsupported(
        "Creating shortcuts",
    ))
}

#[cfg(windows)]
mod win32 {
    use crate::error::{LaunchError, Result, StringError};
    use crate::shortcut::ShortcutSpec;
    use std::ffi::c_void;
    use std::path::{Path, PathBuf};
    use windows::Win32::System::Com::{
        CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
        CoTaskMemFree, CoUninitialize, IPersistFile,
    };
    use windows::Win32::UI::Shell::{
        FOLDERID_Desktop, IShellLinkW, KNOWN_FOLDER_FLAG, SHGetKnownFolderPath, ShellLink,
    };
    use windows::core::{HSTRING, Interface};

    /// Balances a successful `CoInitializeEx` on drop
    struct ComGuard {
        initialized: bool,
    }

    impl ComGuard {
        #[expect(unsafe_code, reason = "Windows FFI for CoInitializeEx")]
        fn new() -> Self {
            // RPC_E_CHANGED_MODE means COM is already up in another mode,
            // which is still usable but must not be uninitialized here
            let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
            Self {
                initialized: hr.is_ok(),
            }
        }
    }

    impl Drop for ComGuard {
        #[expect(unsafe_code, reason = "Windows FFI for CoUninitialize")]
        fn drop(&mut self) {
            if self.initialized {
                unsafe { CoUninitialize() };
            }
        }
    }

    /// # Safety
    ///
    /// The `PWSTR` returned by `SHGetKnownFolderPath` is read once and then
    /// released with `CoTaskMemFree`.
    #[expect(unsafe_code, reason = "Windows FFI for SHGetKnownFolderPath")]
    pub(super) fn known_desktop() -> Result<PathBuf> {
        let raw = unsafe { SHGetKnownFolderPath(&FOLDERID_Desktop, KNOWN_FOLDER_FLAG(0), None) }?;
        let text = unsafe { raw.to_string() };
        unsafe { CoTaskMemFree(Some(raw.0 as *const c_void)) };
        text.map(PathBuf::from)
            .map_err(|e| LaunchError::ShortcutError(Box::new(e)))
    }

    #[expect(
        unsafe_code,
        reason = "Windows FFI for IShellLinkW and IPersistFile"
    )]
    pub(super) fn write_link(spec: &ShortcutSpec, path: &Path) -> Result<()> {
        let _com = ComGuard::new();
        let shortcut_err = |e: windows::core::Error| LaunchError::ShortcutError(Box::new(e));

        let link: IShellLinkW =
            unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }
                .map_err(shortcut_err)?;

        unsafe {
            link.SetPath(&HSTRING::from(spec.target.as_path()))
                .map_err(shortcut_err)?;
            link.SetArguments(&HSTRING::from(spec.arguments.as_str()))
                .map_err(shortcut_err)?;
            link.SetWorkingDirectory(&HSTRING::from(spec.working_dir.as_path()))
                .map_err(shortcut_err)?;
            if let Some(icon) = &spec.icon_location {
                link.SetIconLocation(&HSTRING::from(icon.path.as_path()), icon.index)
                    .map_err(shortcut_err)?;
            }
        }

        let file: IPersistFile = link.cast().map_err(shortcut_err)?;
        unsafe { file.Save(&HSTRING::from(path), true) }.map_err(|e| {
            LaunchError::ShortcutError(StringError::new(format!(
                "could not write {}: {e}",
                path.display()
            )))
        })
    }
}
