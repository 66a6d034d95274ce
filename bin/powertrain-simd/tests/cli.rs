//! ---
//! pt_section: "05-external-interfaces"
//! pt_subsection: "binary"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Binary entrypoint for the assembly-line simulation."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn simd() -> Command {
    let mut cmd = Command::cargo_bin("powertrain-simd").unwrap();
    cmd.env_remove("PT_CONFIG").env("PT_LOG", "error");
    cmd
}

#[test]
fn names_lists_every_table_entry() {
    let output = simd().arg("names").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "powertrain 0: GAS (GasEngine powertrain)\n\
         powertrain 1: HYBRID (HybridEngine powertrain)\n\
         consumer 0: Titano\n\
         consumer 1: MegaForce\n\
         downstream: RoboMount\n"
    );
}

#[test]
fn run_streams_records_and_history_to_stdout() {
    let mut config = NamedTempFile::new().unwrap();
    config
        .write_all(
            b"[simulation]\nproduction_delay = 0\nconsumption_delay = 0\n",
        )
        .unwrap();

    let output = simd()
        .args(["--units", "3", "--config"])
        .arg(config.path())
        .arg("run")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches(". Added ").count(), 6);
    assert_eq!(stdout.matches("Poweredchassis_queue: removed and consumed ").count(), 6);
    assert!(stdout.contains("\nREQUEST REPORT\n"));
    assert!(stdout.contains("GasEngine powertrain producer generated 3 requests"));
    assert!(stdout.trim_end().lines().last().unwrap().starts_with("Elapsed time "));
}

#[test]
fn missing_explicit_config_fails() {
    simd()
        .args(["--config", "no/such/file.toml", "run"])
        .assert()
        .failure();
}
