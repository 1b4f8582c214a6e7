#![no_main]

use libfuzzer_sys::fuzz_target;
use launchonplease::launcher::{LaunchRequest, normalize_path_input};
use launchonplease::placement::PlacementMode;
use launchonplease::shortcut::{SHORTCUT_SUFFIX, ShortcutSpec, shortcut_name_for};
use launchonplease::window::exe_file_name;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Arbitrary pasted paths go through input cleanup, exe-name matching and
    // shortcut naming
    if let Ok(s) = std::str::from_utf8(data) {
        let path = normalize_path_input(s);
        let _ = exe_file_name(&path.to_string_lossy());

        assert!(shortcut_name_for(&path).ends_with(SHORTCUT_SUFFIX));

        let request = LaunchRequest::new(path, data.len() % 4, PlacementMode::Normal, 8);
        let shortcut = ShortcutSpec::for_launch(Path::new("launchonplease.exe"), &request);
        assert!(shortcut.arguments.starts_with("--exe "));
        assert!(shortcut.file_name().ends_with(".lnk"));
    }
});
