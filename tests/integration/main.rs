//! Integration tests for Framecast

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn framecast() -> Command {
        cargo_bin_cmd!("framecast")
    }

    #[test]
    fn help_displays() {
        framecast()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ASCII game multiplexer"));
    }

    #[test]
    fn version_displays() {
        framecast()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("framecast"));
    }

    #[test]
    fn config_show_defaults() {
        framecast()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[pacing]"))
            .stdout(predicate::str::contains("max_updates_per_minute = 60"));
    }

    #[test]
    fn config_path_displays() {
        framecast()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_and_show_custom_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        framecast()
            .args(["--config", path.to_str().unwrap(), "config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Wrote default config"));

        // second init without --force refuses
        framecast()
            .args(["--config", path.to_str().unwrap(), "config", "init"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn run_bounded_ticks_emits_frames() {
        let temp = TempDir::new().unwrap();

        framecast()
            .env("XDG_STATE_HOME", temp.path())
            .env("XDG_CONFIG_HOME", temp.path())
            .args(["run", "--ticks", "2", "--demo-users", "1"])
            .timeout(std::time::Duration::from_secs(30))
            .assert()
            .success()
            .stdout(predicate::str::contains("demo-user-0"))
            .stdout(predicate::str::contains("Health:"));
    }
}
