//! Command-line behavior against a local corpus.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn sodium_typegen() -> Command {
    let mut cmd = Command::cargo_bin("sodium-typegen").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent").env_remove("RUST_LOG");
    cmd
}

fn write_corpus(root: &Path, version: &str) {
    let symbols = root.join("wrapper").join("symbols");
    fs::create_dir_all(&symbols).unwrap();
    fs::write(
        symbols.join("crypto_box_keypair.json"),
        r#"{
            "name": "crypto_box_keypair",
            "inputs": [],
            "return": "{publicKey: _format_output(publicKey, outputFormat), privateKey: _format_output(privateKey, outputFormat), keyType: 'x25519'}"
        }"#,
    )
    .unwrap();
    fs::write(
        root.join("wrapper").join("constants.json"),
        r#"[{ "name": "CRYPTO_BOX_SEEDBYTES", "type": "uint" }]"#,
    )
    .unwrap();
    fs::write(
        root.join("package.json"),
        format!(r#"{{ "version": "{}" }}"#, version),
    )
    .unwrap();
}

#[test]
fn writes_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_corpus(&corpus, "0.7.6");
    let out = dir.path().join("types");
    fs::create_dir(&out).unwrap();

    let output = sodium_typegen()
        .arg("--base")
        .arg(&corpus)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let expected = out.join("libsodium-wrappers.d.ts");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!(
            "Success! The declaration file for libsodium.js v0.7.6 is now available at \"{}\".",
            expected.display()
        )
    );
    let text = fs::read_to_string(expected).unwrap();
    assert!(text.contains("  const CRYPTO_BOX_SEEDBYTES: number;\n"));
}

#[test]
fn sumo_flag() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_corpus(&corpus, "0.7.6");

    let output = sodium_typegen()
        .args(["-s", "-b"])
        .arg(&corpus)
        .arg("--output")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("v0.7.6 (sumo)"));
    let text = fs::read_to_string(dir.path().join("libsodium-wrappers-sumo.d.ts")).unwrap();
    assert!(text.contains("declare module 'libsodium-wrappers-sumo' {"));
}

#[test]
fn raised_minimum_rejects_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_corpus(&corpus, "0.7.6");
    let out = dir.path().join("out.d.ts");

    let output = sodium_typegen()
        .arg("--base")
        .arg(&corpus)
        .args(["--min-version", "0.7.9", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("0.7.9"));
    assert!(!out.exists());
}

#[test]
fn output_is_required() {
    let output = sodium_typegen().arg("--sumo").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--output <OUTPUT>"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn setversion_is_ignored_with_local_base() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_corpus(&corpus, "0.7.6");

    let output = sodium_typegen()
        .arg("-b")
        .arg(&corpus)
        .args(["-v", "0.8.0", "-o"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("v0.7.6 is now available"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ignoring requested version 0.8.0"));
}

#[test]
fn version_flag_prints_version() {
    let output = sodium_typegen().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("sodium-typegen "));
}
