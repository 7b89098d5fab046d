//! Reload through the OS watch API on a real temporary directory.

use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use liveconf::config::WatchSettings;
use liveconf::messages::RecordingSink;
use liveconf::{CircleObject, ConfigReloader, DirectoryMonitor, InitError, ReloadReport};
use tempfile::TempDir;

const COOLDOWN_MS: u64 = 150;

fn circle(radius: u32) -> String {
    format!(
        r#"{{
    "dataType": "circleObject",
    "center": {{ "type": "Vec2", "x": 0, "y": 0 }},
    "radius": {{ "type": "double", "value": {radius} }}
}}"#
    )
}

fn settings(temp: &TempDir) -> WatchSettings {
    WatchSettings {
        directory: temp.path().join("config"),
        cooldown_ms: COOLDOWN_MS,
        ..WatchSettings::default()
    }
}

/// Tick until `done` holds for a report or the deadline passes.
fn tick_until(
    reloader: &mut ConfigReloader,
    timeout: Duration,
    mut done: impl FnMut(&ReloadReport) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done(&reloader.tick()) {
            return true;
        }
        sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn existing_file_loads_without_any_event() {
    let temp = TempDir::new().unwrap();
    let settings = settings(&temp);
    std::fs::create_dir_all(&settings.directory).unwrap();
    std::fs::write(settings.directory.join("circle.json"), circle(5)).unwrap();

    let mut reloader =
        ConfigReloader::from_settings(&settings, Arc::new(RecordingSink::new())).unwrap();

    assert_eq!(reloader.tick().applied, vec!["circleObject"]);
    assert_eq!(
        reloader.get_config::<CircleObject>().map(|c| c.radius),
        Some(5.0)
    );
}

#[test]
fn modified_file_is_reloaded() {
    let temp = TempDir::new().unwrap();
    let settings = settings(&temp);
    let mut reloader =
        ConfigReloader::from_settings(&settings, Arc::new(RecordingSink::new())).unwrap();
    assert!(settings.directory.is_dir());

    let path = reloader.monitor().directory().join("circle.json");
    for _ in 0..3 {
        std::fs::write(&path, circle(7)).unwrap();
    }

    let applied = tick_until(&mut reloader, Duration::from_secs(5), |r| r.changed());
    assert!(applied, "change was never applied");
    assert_eq!(
        reloader.get_config::<CircleObject>().map(|c| c.radius),
        Some(7.0)
    );

    // The burst settled once; nothing else is pending afterwards.
    sleep(Duration::from_millis(COOLDOWN_MS * 2));
    let again = tick_until(&mut reloader, Duration::from_millis(300), |r| r.changed());
    assert!(!again);
}

#[test]
fn unwatched_extension_never_surfaces() {
    let temp = TempDir::new().unwrap();
    let settings = settings(&temp);
    let mut reloader =
        ConfigReloader::from_settings(&settings, Arc::new(RecordingSink::new())).unwrap();

    std::fs::write(reloader.monitor().directory().join("image.png"), [0u8; 16]).unwrap();

    let surfaced = tick_until(&mut reloader, Duration::from_millis(COOLDOWN_MS * 3), |r| {
        !r.is_empty()
    });
    assert!(!surfaced);
    assert_eq!(reloader.monitor().pending_count(), 0);
}

#[test]
fn file_in_place_of_directory_fails_init() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("config");
    std::fs::write(&blocker, "occupied").unwrap();

    let result = DirectoryMonitor::init(
        &blocker,
        &["json"],
        COOLDOWN_MS,
        Arc::new(RecordingSink::new()),
    );
    assert!(matches!(result, Err(InitError::DirectoryUnavailable { .. })));
}
