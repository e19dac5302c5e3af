use crate::cli::Args;
use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent a run.
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Fold command-line overrides into the loaded settings.
pub fn apply_args(settings: &mut config::Settings, args: &Args) {
    if let Some(secs) = args.timeout {
        settings.recognizer.timeout_secs = secs;
    }
}
