//! Waiting for the launched program to show up

use crate::config::Preferences;
use crate::display::{Rect, rect_changed};
use crate::window::{WindowHandle, WindowSystem};
use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Collect `root_pid` and every process it starts during the discovery window
///
/// Runs `child_discovery_rounds` snapshots `poll_interval_ms` apart; launchers
/// that hand off to a child and exit are covered because PIDs are only ever
/// added.
pub fn discover_process_tree(
    system: &dyn WindowSystem,
    root_pid: u32,
    prefs: &Preferences,
) -> HashSet<u32> {
    let mut pids = HashSet::from([root_pid]);
    for round in 0..prefs.child_discovery_rounds {
        match system.process_snapshot() {
            Ok(snapshot) => pids.extend(snapshot.descendants_of(root_pid)),
            Err(e) => debug!("Process snapshot failed in round {}: {}", round, e),
        }
        thread::sleep(prefs.poll_interval());
    }
    debug!("Process tree of {}: {:?}", root_pid, pids);
    pids
}

/// Poll `select` until it yields a window or `timeout` passes
///
/// With `early_move_on_detect` the first candidate is returned. Otherwise the
/// same candidate must keep its rectangle (within `rect_tolerance_px`) for
/// `stable_ms_before_move` before it is returned; a different candidate or a
/// moved rectangle restarts the quiet period.
pub fn wait_for_window(
    system: &dyn WindowSystem,
    prefs: &Preferences,
    timeout: Duration,
    mut select: impl FnMut() -> Option<WindowHandle>,
) -> Option<WindowHandle> {
    let deadline = Instant::now() + timeout;
    let poll = prefs.poll_interval();
    let quiet_period = Duration::from_millis(prefs.stable_ms_before_move);

    let mut tracked: Option<(WindowHandle, Option<Rect>, Instant)> = None;

    while Instant::now() < deadline {
        let Some(candidate) = select() else {
            thread::sleep(poll);
            continue;
        };

        if prefs.early_move_on_detect {
            debug!("Window detected: {:?}", candidate);
            return Some(candidate);
        }

        let rect = system.window_rect(candidate);
        match tracked {
            Some((handle, last, since))
                if handle == candidate && !rect_changed(rect, last, prefs.rect_tolerance_px) =>
            {
                if since.elapsed() >= quiet_period {
                    debug!("Window settled: {:?} at {:?}", candidate, rect);
                    return Some(candidate);
                }
            }
            _ => {
                trace!("Tracking {:?} at {:?}", candidate, rect);
                tracked = Some((candidate, rect, Instant::now()));
                if quiet_period.is_zero() {
                    return Some(candidate);
                }
            }
        }
        thread::sleep(poll);
    }

    None
}
