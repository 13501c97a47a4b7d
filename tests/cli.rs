use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_create_then_extract() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("input.txt");
    let archive = temp.path().join("input.huf");
    let output = temp.path().join("output.txt");
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
    std::fs::write(&input, &text).unwrap();

    Command::cargo_bin("huffarc")
        .unwrap()
        .arg("-c")
        .arg("-f")
        .arg(&archive)
        .arg(&input)
        .assert()
        .success();
    assert!(std::fs::metadata(&archive).unwrap().len() < text.len() as u64);

    Command::cargo_bin("huffarc")
        .unwrap()
        .arg("-x")
        .arg("-f")
        .arg(&archive)
        .arg(&output)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
}

#[test]
fn test_tree_flag_prints_leaves() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("aaab.txt");
    let archive = temp.path().join("aaab.huf");
    std::fs::write(&input, "aaab").unwrap();

    Command::cargo_bin("huffarc")
        .unwrap()
        .args(["-c", "--tree", "-f"])
        .arg(&archive)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("(b, 1, 2) (a, 3, 1)"));
}

#[test]
fn test_mode_is_required() {
    let temp = tempdir().unwrap();
    Command::cargo_bin("huffarc")
        .unwrap()
        .arg(temp.path().join("whatever"))
        .assert()
        .failure();
}

#[test]
fn test_both_modes_rejected() {
    let temp = tempdir().unwrap();
    Command::cargo_bin("huffarc")
        .unwrap()
        .args(["-c", "-x"])
        .arg(temp.path().join("whatever"))
        .assert()
        .failure();
}

#[test]
fn test_truncated_archive_fails() {
    let temp = tempdir().unwrap();
    let archive = temp.path().join("bad.huf");
    std::fs::write(&archive, [3u8, b'a', 1]).unwrap();

    Command::cargo_bin("huffarc")
        .unwrap()
        .arg("-x")
        .arg("-f")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing archive"));
}
