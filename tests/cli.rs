mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use common::{uniform_pdf, GREEN, RED};
use image::GenericImageView;
use predicates::str::contains;
use tempdir::TempDir;

fn pdfcompare() -> Command {
    let mut cmd = Command::cargo_bin("pdfcompare").unwrap();
    cmd.env_remove("PDFCOMPARE_SCALE")
        .env_remove("PDFCOMPARE_MAX_PIXELS");
    cmd
}

fn write(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

#[test]
fn identical_files_exit_zero() {
    let dir = TempDir::new("pdfcompare").unwrap();
    let pdf = uniform_pdf(2, 50, 50, RED);
    write(&dir.path().join("a.pdf"), &pdf);
    write(&dir.path().join("b.pdf"), &pdf);
    let out = dir.path().join("out");

    pdfcompare()
        .arg(dir.path().join("a.pdf"))
        .arg(dir.path().join("b.pdf"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("identical"));

    assert!(!out.exists());
}

#[test]
fn different_files_write_one_sheet_per_page() {
    let dir = TempDir::new("pdfcompare").unwrap();
    write(&dir.path().join("a.pdf"), &uniform_pdf(3, 50, 50, RED));
    write(&dir.path().join("b.pdf"), &uniform_pdf(1, 50, 50, GREEN));
    let out = dir.path().join("out");

    pdfcompare()
        .arg(dir.path().join("a.pdf"))
        .arg(dir.path().join("b.pdf"))
        .args(["--scale", "1", "--border", "0"])
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stdout(contains("differ"));

    for page in 1..=3 {
        let sheet = image::open(out.join(format!("page-{}.png", page))).unwrap();
        // Two 50 pt pages at scale 1 plus the default gutter.
        assert_eq!((sheet.width(), sheet.height()), (50 + 16 + 50, 50));
    }
    assert!(!out.join("page-4.png").exists());
}

#[test]
fn directories_are_paired_by_relative_path() {
    let dir = TempDir::new("pdfcompare").unwrap();
    let left = dir.path().join("left");
    let right = dir.path().join("right");
    let same = uniform_pdf(1, 30, 30, RED);
    write(&left.join("same.pdf"), &same);
    write(&right.join("same.pdf"), &same);
    write(&left.join("nested/changed.pdf"), &uniform_pdf(2, 30, 30, RED));
    write(&right.join("nested/changed.pdf"), &uniform_pdf(2, 30, 30, GREEN));
    write(&left.join("notes.txt"), b"ignored");
    let out = dir.path().join("out");

    pdfcompare()
        .arg(&left)
        .arg(&right)
        .args(["--scale", "1"])
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1);

    assert!(out.join("nested/changed-1.png").is_file());
    assert!(out.join("nested/changed-2.png").is_file());
    assert!(!out.join("same-1.png").exists());
}

#[test]
fn file_without_a_partner_counts_as_different() {
    let dir = TempDir::new("pdfcompare").unwrap();
    let left = dir.path().join("left");
    let right = dir.path().join("right");
    let same = uniform_pdf(1, 30, 30, RED);
    write(&left.join("same.pdf"), &same);
    write(&right.join("same.pdf"), &same);
    write(&left.join("only.pdf"), &uniform_pdf(1, 30, 30, GREEN));
    fs::create_dir_all(&right).unwrap();
    let out = dir.path().join("out");

    pdfcompare()
        .arg(&left)
        .arg(&right)
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1)
        .stdout(contains("only.pdf is missing"));

    assert!(!out.join("only-1.png").exists());
}

#[test]
fn identical_directories_exit_zero() {
    let dir = TempDir::new("pdfcompare").unwrap();
    let pdf = uniform_pdf(1, 30, 30, RED);
    write(&dir.path().join("left/a.pdf"), &pdf);
    write(&dir.path().join("right/a.pdf"), &pdf);

    pdfcompare()
        .arg(dir.path().join("left"))
        .arg(dir.path().join("right"))
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .success();
}

#[test]
fn unreadable_input_exits_two() {
    let dir = TempDir::new("pdfcompare").unwrap();
    write(&dir.path().join("a.pdf"), &uniform_pdf(1, 30, 30, RED));

    pdfcompare()
        .arg(dir.path().join("a.pdf"))
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .code(2)
        .stderr(contains("unable to read"));
}

#[test]
fn invalid_scale_exits_two() {
    let dir = TempDir::new("pdfcompare").unwrap();
    write(&dir.path().join("a.pdf"), &uniform_pdf(1, 30, 30, RED));
    write(&dir.path().join("b.pdf"), &uniform_pdf(1, 30, 30, GREEN));

    pdfcompare()
        .arg(dir.path().join("a.pdf"))
        .arg(dir.path().join("b.pdf"))
        .args(["--scale", "0"])
        .assert()
        .code(2)
        .stderr(contains("scale"));
}

#[test]
fn scale_can_come_from_the_environment() {
    let dir = TempDir::new("pdfcompare").unwrap();
    write(&dir.path().join("a.pdf"), &uniform_pdf(1, 40, 20, RED));
    write(&dir.path().join("b.pdf"), &uniform_pdf(1, 40, 20, GREEN));
    let out = dir.path().join("out");

    pdfcompare()
        .env("PDFCOMPARE_SCALE", "0.5")
        .arg(dir.path().join("a.pdf"))
        .arg(dir.path().join("b.pdf"))
        .args(["--border", "0"])
        .arg("--out")
        .arg(&out)
        .assert()
        .code(1);

    let sheet = image::open(out.join("page-1.png")).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (20 + 16 + 20, 10));
}

#[test]
fn invalid_border_exits_two() {
    let dir = TempDir::new("pdfcompare").unwrap();
    write(&dir.path().join("a.pdf"), &uniform_pdf(1, 30, 30, RED));
    write(&dir.path().join("b.pdf"), &uniform_pdf(1, 30, 30, GREEN));
    let out = dir.path().join("out");

    for border in ["NaN", "1.5"] {
        pdfcompare()
            .arg(dir.path().join("a.pdf"))
            .arg(dir.path().join("b.pdf"))
            .args(["--border", border])
            .arg("--out")
            .arg(&out)
            .assert()
            .code(2)
            .stderr(contains("border"));
    }

    assert!(!out.exists());
}
