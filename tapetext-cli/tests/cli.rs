//! Runs the `tapetext` binary the way a shell pipeline would.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use tapetext::FontFile;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path = std::env::temp_dir().join(format!(
            "tapetext_cli_{tag}_{}_{}",
            std::process::id(),
            ts
        ));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        drop(fs::remove_dir_all(&self.path));
    }
}

fn run_tapetext(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tapetext"))
        .args(args)
        .output()
        .expect("run tapetext")
}

fn decode(output: &Output) -> image::DynamicImage {
    assert!(output.status.success(), "process failed: {output:?}");
    assert!(
        output.stdout.starts_with(PNG_SIGNATURE),
        "expected PNG on stdout"
    );
    image::load_from_memory(&output.stdout).expect("decode PNG output")
}

#[test]
fn writes_png_to_pipe() {
    let image = decode(&run_tapetext(&["Hello, world"]));
    assert_eq!(image.height(), 64);
    assert!(image.width() > 64);
}

#[test]
fn height_flag() {
    let image = decode(&run_tapetext(&["--height", "42", "--dpi", "180", "Hello"]));
    assert_eq!(image.height(), 42);
}

#[test]
fn missing_text_exits_with_2() {
    let output = run_tapetext(&[]);
    assert_eq!(output.status.code(), Some(2), "{output:?}");
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing text"), "stderr: {stderr}");
}

#[test]
fn multiple_lines_fail() {
    let output = run_tapetext(&["first", "second"]);
    assert_eq!(output.status.code(), Some(1), "{output:?}");
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("multi-line"), "stderr: {stderr}");
}

#[test]
fn zero_height_fails() {
    let output = run_tapetext(&["--height", "0", "text"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn bundled_font_by_name() {
    let regular = decode(&run_tapetext(&["--font", "DejaVuSans", "Label"]));
    let condensed = decode(&run_tapetext(&["--font", "DejaVuSansCondensed", "Label"]));
    assert_eq!(regular.height(), condensed.height());
    assert!(condensed.width() < regular.width());
}

#[test]
fn font_from_file() {
    let dir = TestDir::new("font_file");
    let font_path = dir.path.join("custom.ttf");
    fs::write(&font_path, FontFile::SansBold.as_bytes()).expect("write font file");
    let by_path = decode(&run_tapetext(&[
        "--font",
        font_path.to_str().expect("utf-8 temp path"),
        "Bold",
    ]));
    let by_name = decode(&run_tapetext(&["--font", "DejaVuSans-Bold", "Bold"]));
    assert_eq!(by_path.to_luma8().as_raw(), by_name.to_luma8().as_raw());
}

#[test]
fn unknown_font_fails() {
    let dir = TestDir::new("bad_font");
    let font_path = dir.path.join("not-a-font.ttf");
    fs::write(&font_path, "definitely not a font").expect("write bogus font");
    let output = run_tapetext(&[
        "--font",
        font_path.to_str().expect("utf-8 temp path"),
        "text",
    ]);
    assert_eq!(output.status.code(), Some(1), "{output:?}");

    let output = run_tapetext(&["--font", "NoSuchFont", "text"]);
    assert_eq!(output.status.code(), Some(1), "{output:?}");
}
