//! Setup and shell-integration command implementations.

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::core::Clock;
use crate::error::PomtrackError;
use crate::features::focus::{FileStore, RecordStore, SessionRecord};
use crate::features::shell::{completion_install_instructions, generate_completions, shell_from_str};
use crate::output::to_json;

/// Create the data root, a default config and a fresh session record.
///
/// An existing record is kept unless `force` is set. An existing config is
/// never touched.
///
/// # Errors
///
/// Returns an error if the directory, config or record cannot be written.
pub fn init(
    paths: &Paths,
    clock: &Clock,
    force: bool,
    format: OutputFormat,
) -> Result<String, PomtrackError> {
    paths.ensure_dirs()?;

    let wrote_config = !paths.config_file.exists();
    if wrote_config {
        Config::default().save_to_path(&paths.config_file)?;
    }

    let store = FileStore::new(paths.state_file.clone());
    let existed = store.exists();
    let wrote_record = force || !existed;
    if wrote_record {
        store.save(&SessionRecord::fresh(clock.now()))?;
    }

    match format {
        OutputFormat::Json => to_json(&json!({
            "root": paths.root,
            "record_written": wrote_record,
            "config_written": wrote_config,
        })),
        OutputFormat::Pretty => {
            let state = paths.state_file.display();
            Ok(match (existed, wrote_record) {
                (true, false) => format!("Session record already exists at {state} (use --force to overwrite)"),
                (true, true) => format!("Session record reset at {state}"),
                _ => format!("Created session record at {state}"),
            })
        }
    }
}

/// Print a completion script or its install instructions.
///
/// # Errors
///
/// Returns `PomtrackError::Config` for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, PomtrackError> {
    let shell = shell_from_str(shell).ok_or_else(|| {
        PomtrackError::Config(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_init_creates_record_and_config() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join("home"));

        let output = init(&paths, &Clock::fixed(t0()), false, OutputFormat::Pretty).unwrap();

        assert!(output.starts_with("Created session record"));
        assert!(paths.config_file.exists());
        let record = FileStore::new(paths.state_file.clone()).load().unwrap();
        assert_eq!(record, SessionRecord::fresh(t0()));
    }

    #[test]
    fn test_init_keeps_existing_record() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let store = FileStore::new(paths.state_file.clone());
        let mut record = SessionRecord::fresh(t0());
        record.count = 6;
        store.save(&record).unwrap();

        let output = init(&paths, &Clock::fixed(t0()), false, OutputFormat::Pretty).unwrap();

        assert!(output.contains("already exists"));
        assert_eq!(store.load().unwrap().count, 6);
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        let store = FileStore::new(paths.state_file.clone());
        let mut record = SessionRecord::fresh(t0());
        record.count = 6;
        store.save(&record).unwrap();

        init(&paths, &Clock::fixed(t0()), true, OutputFormat::Pretty).unwrap();

        assert_eq!(store.load().unwrap().count, 0);
    }

    #[test]
    fn test_init_does_not_touch_config() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        std::fs::write(&paths.config_file, "session:\n  length_minutes: 50\n").unwrap();

        let output = init(&paths, &Clock::fixed(t0()), false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["config_written"], false);
        assert_eq!(value["record_written"], true);
        let config = Config::load_from_path(&paths.config_file).unwrap();
        assert_eq!(config.session.length_minutes, 50);
    }

    #[test]
    fn test_completions_unknown_shell() {
        let err = completions("tcsh", false).unwrap_err();
        assert!(err.to_string().contains("Unknown shell"));
    }

    #[test]
    fn test_completions_install() {
        assert!(completions("fish", true).unwrap().contains("pomtrack.fish"));
    }
}
