//! Recognition against a stand-in tesseract.
//!
//! The fake binary is a shell script that records its arguments, copies the
//! whitelist config (which is deleted after the run), and writes the text
//! found in its `response` file to `<outputBase>.txt`.
#![cfg(unix)]

use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tessocr_core::{OcrEngine, OcrError, Recognizer, RecognizerSettings, TesseractEngine};

const FAKE_TESSERACT: &str = r#"#!/bin/sh
dir=$(dirname "$0")
printf '%s\n' "$@" > "$dir/args.log"
shift
if [ "$1" = "-l" ]; then shift 2; fi
out="$1"
shift
if [ "$1" = "nobatch" ]; then cat "$2" > "$dir/config.log"; fi
printf '\n  %s  \n\n' "$(cat "$dir/response")" > "$out.txt"
"#;

struct FakeTesseract {
    bin_dir: TempDir,
    scratch: TempDir,
}

impl FakeTesseract {
    fn new(response: &str) -> Self {
        Self::with_script(FAKE_TESSERACT, response)
    }

    fn with_script(script: &str, response: &str) -> Self {
        let bin_dir = TempDir::new().unwrap();
        let binary = bin_dir.path().join("tesseract");
        fs::write(&binary, script).unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(bin_dir.path().join("response"), response).unwrap();

        Self {
            bin_dir,
            scratch: TempDir::new().unwrap(),
        }
    }

    fn binary(&self) -> String {
        self.bin_dir.path().join("tesseract").to_string_lossy().into_owned()
    }

    fn temp_dir(&self) -> &Path {
        self.scratch.path()
    }

    fn recognizer(&self, image: &str) -> Recognizer {
        Recognizer::new(image)
            .binary(self.binary())
            .temp_dir(self.temp_dir())
    }

    fn args(&self) -> Vec<String> {
        fs::read_to_string(self.bin_dir.path().join("args.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn recorded_config(&self) -> Option<String> {
        fs::read_to_string(self.bin_dir.path().join("config.log")).ok()
    }

    fn scratch_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.temp_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

#[test]
#[serial]
fn test_plain_recognition_returns_trimmed_text() {
    let fake = FakeTesseract::new("Hello World");

    let text = fake.recognizer("images/photo.png").recognize().unwrap();

    assert_eq!(text, "Hello World");
    let expected_base = format!("{}/photo.png", fake.temp_dir().display());
    assert_eq!(fake.args(), vec!["images/photo.png".to_string(), expected_base]);
    assert!(fake.recorded_config().is_none());
}

#[test]
#[serial]
fn test_language_passed_once() {
    let fake = FakeTesseract::new("Grüße");

    let text = fake.recognizer("photo.png").language("deu").recognize().unwrap();

    assert_eq!(text, "Grüße");
    let args = fake.args();
    assert_eq!(&args[1..3], &["-l".to_string(), "deu".to_string()]);
    assert_eq!(args.iter().filter(|a| a.as_str() == "-l").count(), 1);
}

#[test]
#[serial]
fn test_whitelist_config_content_and_cleanup() {
    let fake = FakeTesseract::new("DCBA");

    let text = fake
        .recognizer("photo.png")
        .whitelist(vec![vec!["AB".to_string()], vec!["C".to_string(), "D".to_string()]])
        .recognize()
        .unwrap();

    assert_eq!(text, "DCBA");
    assert_eq!(
        fake.recorded_config().as_deref(),
        Some("tessedit_char_whitelist ABCD")
    );

    let args = fake.args();
    assert_eq!(args[args.len() - 2], "nobatch");
    assert!(args[args.len() - 1].ends_with(".conf"));
    assert!(!Path::new(&args[args.len() - 1]).exists());
}

#[test]
#[serial]
fn test_output_file_removed_unless_kept() {
    let fake = FakeTesseract::new("text");
    fake.recognizer("photo.png").recognize().unwrap();
    assert!(fake.scratch_files().is_empty());

    fake.recognizer("photo.png").keep_output(true).recognize().unwrap();
    assert_eq!(
        fake.scratch_files(),
        vec![fake.temp_dir().join("photo.png.txt")]
    );
}

#[test]
#[serial]
fn test_nonzero_exit_is_process_failed() {
    let script = "#!/bin/sh\necho 'Error, cannot read input file' >&2\nexit 1\n";
    let fake = FakeTesseract::with_script(script, "");

    let err = fake
        .recognizer("missing.png")
        .whitelist(["0123456789"])
        .recognize()
        .unwrap_err();

    match err {
        OcrError::ProcessFailed { code, stderr } => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "Error, cannot read input file");
        }
        other => panic!("expected ProcessFailed, got {:?}", other),
    }
    assert!(fake.scratch_files().is_empty(), "config file should be removed");
}

#[test]
#[serial]
fn test_partial_output_removed_when_tesseract_fails() {
    let script = "#!/bin/sh\nprintf partial > \"$2.txt\"\nexit 1\n";
    let fake = FakeTesseract::with_script(script, "");

    let result = fake.recognizer("photo.png").recognize();

    assert!(matches!(result, Err(OcrError::ProcessFailed { .. })));
    assert!(
        fake.scratch_files().is_empty(),
        "scratch files left behind: {:?}",
        fake.scratch_files()
    );
}

#[test]
#[serial]
fn test_missing_output_is_output_read_error() {
    let fake = FakeTesseract::with_script("#!/bin/sh\nexit 0\n", "");

    let err = fake.recognizer("photo.png").recognize().unwrap_err();

    match err {
        OcrError::OutputRead { path, .. } => {
            assert_eq!(path, fake.temp_dir().join("photo.png.txt"));
        }
        other => panic!("expected OutputRead, got {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn test_engine_uses_shared_settings() -> anyhow::Result<()> {
    let fake = FakeTesseract::new("42");
    let engine = TesseractEngine::new(RecognizerSettings {
        binary: fake.binary(),
        language: Some("eng".to_string()),
        whitelist: Some("0123456789".to_string()),
        temp_dir: Some(fake.temp_dir().to_path_buf()),
        ..Default::default()
    })?;

    assert_eq!(engine.name(), "Tesseract OCR");
    assert_eq!(engine.recognize_file("receipt.png").await?, "42");
    assert_eq!(
        fake.recorded_config().as_deref(),
        Some("tessedit_char_whitelist 0123456789")
    );
    assert!(fake.args().contains(&"eng".to_string()));
    Ok(())
}

#[test]
#[serial]
fn test_engine_version_reads_first_line() {
    let script = "#!/bin/sh\necho 'tesseract 5.3.0'\necho ' leptonica-1.82.0'\n";
    let fake = FakeTesseract::with_script(script, "");
    let engine = TesseractEngine::new(RecognizerSettings {
        binary: fake.binary(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(engine.version().unwrap(), "tesseract 5.3.0");
}
