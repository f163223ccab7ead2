use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::{predicate, PredicateBooleanExt};

const NETWORK: &str = "A 1 B -1 C\nA 2 B\nD -> C\n";

const PROFILE: &str = "A = input\nA = +\nC = -\nX = 0\nB = foo\n";

#[test]
fn test_check_network() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("network.sif")?;
    file.write_str(NETWORK)?;
    let mut cmd = Command::cargo_bin("iggy")?;
    cmd.arg("check").arg("-n").arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("- OR nodes (species): 4"))
        .stdout(predicate::str::contains("- Activations: 2"))
        .stdout(predicate::str::contains("- Inhibitions: 1"))
        .stderr(predicate::str::contains("at line 2"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_check_network_and_profile() -> Result<(), Box<dyn std::error::Error>> {
    let network = NamedTempFile::new("network.sif")?;
    network.write_str(NETWORK)?;
    let profile = NamedTempFile::new("profile.txt")?;
    profile.write_str(PROFILE)?;
    let mut cmd = Command::cargo_bin("iggy")?;
    cmd.arg("check")
        .arg("-n")
        .arg(network.path())
        .arg("-o")
        .arg(profile.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("## Observations statistics"))
        .stdout(predicate::str::contains("- Observed not in model:  1"))
        .stdout(predicate::str::contains("- Inputs:                 1"))
        .stderr(predicate::str::contains("at line 5"));
    network.close().unwrap();
    profile.close().unwrap();
    Ok(())
}

#[test]
fn test_check_json() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("network.sif")?;
    file.write_str(NETWORK)?;
    let mut cmd = Command::cargo_bin("iggy")?;
    cmd.arg("check").arg("-n").arg(file.path()).arg("--json");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains(r#""or_nodes": 4"#))
        .stdout(predicate::str::contains("observations").not());
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_check_requires_an_input() {
    let mut cmd = Command::cargo_bin("iggy").unwrap();
    cmd.arg("check");
    cmd.assert().failure().code(1);
}

#[test]
fn test_check_missing_file() {
    let mut cmd = Command::cargo_bin("iggy").unwrap();
    cmd.arg("check").arg("-n").arg("/this/file/does/not/exist.sif");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("while opening file"));
}
