//! Global shortcut accelerator strings.

/// Builds a Tauri accelerator from the stored prefix and key settings.
///
/// `option`/`alt` map to `Alt`, `win`/`command` to `Super`. Unknown prefixes
/// are passed through unchanged so the registrar can report them.
pub fn accelerator(prefix: &str, key: &str) -> String {
    let modifier = match prefix.trim().to_ascii_lowercase().as_str() {
        "alt" | "option" => "Alt".to_string(),
        "ctrl" | "control" => "Control".to_string(),
        "shift" => "Shift".to_string(),
        "win" | "command" | "cmd" | "super" => "Super".to_string(),
        _ => prefix.trim().to_string(),
    };
    format!("{}+{}", modifier, key.trim().to_uppercase())
}
