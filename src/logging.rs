use log::LevelFilter;
use tauri_plugin_log::{Target, TargetKind, TimezoneStrategy};

pub const LOG_FILE: &str = "clip-translate";

/// Log plugin: Debug in debug builds, Info otherwise, to stdout and the app log dir.
pub fn builder() -> tauri_plugin_log::Builder {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    tauri_plugin_log::Builder::new()
        .clear_targets()
        .timezone_strategy(TimezoneStrategy::UseLocal)
        .level(level)
        // Keep HTTP and webview internals out of the file.
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("tao", LevelFilter::Warn)
        .format(|out, message, record| {
            // 2026-01-05 10:30:45.123 INFO [monitor.rs:64] [clip_translate_lib::core] message
            out.finish(format_args!(
                "{} {} [{}:{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.target(),
                message
            ))
        })
        .target(Target::new(TargetKind::Stdout))
        .target(Target::new(TargetKind::LogDir {
            file_name: Some(LOG_FILE.to_string()),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let _builder = builder();
    }
}
