// tests/common/mod.rs -- Shared helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Resolve the compiled binary from the workspace target directory
pub fn cppdoc_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("current_exe")
        .parent()
        .expect("parent")
        .to_path_buf();

    if path.ends_with("deps") {
        path.pop();
    }
    path.join("cppdoc")
}

/// Execute the cppdoc binary with given arguments, isolated from any user
/// configuration and running inside `cwd`.
pub fn run_cppdoc_in(cwd: &Path, args: &[&str]) -> std::process::Output {
    std::process::Command::new(cppdoc_bin())
        .args(args)
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cppdoc binary")
}

/// Execute the cppdoc binary with given arguments
pub fn run_cppdoc(fixture: &TempDir, args: &[&str]) -> std::process::Output {
    run_cppdoc_in(fixture.path(), args)
}

/// Create a temporary directory with a set of named files and content.
pub fn make_fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("TempDir::new");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    dir
}

pub const LED_CPP: &str = "\
#include \"led.h\"

/**
 * @brief Creates the LED on a pin.
 * @param pin Output pin
 */
LED::LED(byte pin) {
    this->pin = pin;
}

// Switches the LED on
void LED::on() {
    digitalWrite(pin, HIGH);
}

bool LED::isOn() const {
    return digitalRead(pin) == HIGH;
}
";
