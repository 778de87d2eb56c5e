use assert_cmd::Command;
use predicates::prelude::*;

fn glyphcrypt() -> Command {
    Command::cargo_bin("glyphcrypt").expect("binary builds")
}

#[test]
fn list_shows_builtin_charsets() {
    glyphcrypt()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default-efficient-binary"))
        .stdout(predicate::str::contains("default-literal"));
}

#[test]
fn encrypt_then_decrypt_roundtrips() {
    let sealed = glyphcrypt()
        .args(["hello from the cli", "--key", "testkey", "--iv", "1234567890123456"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let sealed = String::from_utf8(sealed).unwrap();

    glyphcrypt()
        .args([
            sealed.trim(),
            "--key",
            "testkey",
            "--iv",
            "1234567890123456",
            "--decrypt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello from the cli"));
}

#[test]
fn encode_only_translates_without_cipher() {
    let encoded = glyphcrypt()
        .args(["deadbeef", "--encode-only", "--charset", "literal"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let encoded = String::from_utf8(encoded).unwrap();

    glyphcrypt()
        .args([encoded.trim(), "--encode-only", "--charset", "literal", "--decrypt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deadbeef"));
}

#[test]
fn unknown_charset_fails() {
    glyphcrypt()
        .args(["hi", "--key", "k", "--iv", "iv", "--charset", "nonesuch"])
        .assert()
        .failure();
}

#[test]
fn reads_message_from_stdin() {
    glyphcrypt()
        .args(["--encode-only", "--charset", "binary"])
        .write_stdin("hi\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1F921}"));
}
