#![no_main]

use libfuzzer_sys::fuzz_target;
use launchonplease::config::AppConfig;

fuzz_target!(|data: &[u8]| {
    // Hand-edited config files must never crash the launcher
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(config) = serde_json::from_str::<AppConfig>(s)
    {
        let prefs = config.preferences.sanitized();
        assert!(prefs.poll_interval_ms >= 1);
        assert!(prefs.min_window_width >= 0);
        let _ = (prefs.wait_timeout(), prefs.fallback_timeout(), prefs.poll_interval());
    }
});
