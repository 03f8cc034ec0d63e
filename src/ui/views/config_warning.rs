use texfast::config::ConfigWarning;

/// One line per unknown key, with a suggestion when one is close enough.
pub fn render_config_warning(w: &ConfigWarning) -> String {
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };
    match &w.suggestion {
        Some(suggestion) => format!(
            "Unknown config key '{}' in {}. Did you mean '{}'?",
            w.key, location, suggestion
        ),
        None => format!("Unknown config key '{}' in {}", w.key, location),
    }
}
