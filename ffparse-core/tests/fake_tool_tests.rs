// ffparse-core/tests/fake_tool_tests.rs
//
// Real process plumbing against shell scripts standing in for ffmpeg and
// ffprobe.

#![cfg(unix)]

use ffparse_core::{CoreError, ErrorKind, SignatureSet, Tool, ToolConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// Writing an executable while another test thread forks can make exec fail
// with ETXTBSY, so these tests run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

const FAKE_FFPROBE: &str = r#"
case "$1" in
  -version)
    echo "ffprobe version 6.1.1 Copyright (c) 2007-2023 the FFmpeg developers"
    echo "built with gcc 13"
    ;;
  -show_format)
    if [ ! -f "$3" ]; then
      echo "$3: No such file or directory" >&2
      exit 1
    fi
    echo "ffprobe banner on stderr" >&2
    printf '[STREAM]\nindex=0\ncodec_name=h264\ncodec_type=video\n[/STREAM]\n'
    printf '[FORMAT]\nfilename=%s\nnb_streams=1\nduration=12.5\n[/FORMAT]\n' "$3"
    ;;
esac
"#;

const FAKE_FFMPEG: &str = r#"
case "$1" in
  -version)
    echo "ffmpeg version 3.2 Copyright (c) 2000-2016 the FFmpeg developers"
    ;;
  -devices)
    printf 'Devices:\n D. = Demuxing supported\n .E = Muxing supported\n --\n'
    printf ' DE alsa            ALSA audio output\n'
    ;;
  -y)
    echo "frame=   10 fps=0.0 q=28.0" >&2
    ;;
  *)
    echo "Input #0, matroska,webm, from 'in.mkv':" >&2
    echo "File 'out.mkv' already exists. Overwrite? [y/N] " >&2
    exec sleep 30
    ;;
esac
"#;

struct Fixture {
    dir: TempDir,
    config: ToolConfig,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let ffprobe = write_script(dir.path(), "ffprobe", FAKE_FFPROBE);
    let ffmpeg = write_script(dir.path(), "ffmpeg", FAKE_FFMPEG);
    let config = ToolConfig::new()
        .with_ffprobe_path(ffprobe)
        .with_ffmpeg_path(ffmpeg);
    Fixture { dir, config }
}

#[test]
fn test_probe_real_process() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let media = fixture.dir.path().join("movie.mkv");
    fs::write(&media, b"not really a movie").unwrap();

    let ffprobe = Tool::ffprobe(&fixture.config).unwrap();
    let info = ffprobe.probe(&media).unwrap();
    assert_eq!(info.streams.len(), 1);
    assert_eq!(info.streams[0].codec().name(), Some("h264"));
    assert_eq!(info.duration(), Some(12.5));
    assert_eq!(
        info.format.unwrap().filename,
        Some(media.display().to_string())
    );
}

#[test]
fn test_probe_missing_file_fails() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let ffprobe = Tool::ffprobe(&fixture.config).unwrap();
    let err = ffprobe
        .probe(&fixture.dir.path().join("missing.mkv"))
        .unwrap_err();
    assert!(matches!(err, CoreError::CommandFailed { .. }));
}

#[test]
fn test_version_real_process() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let ffprobe = Tool::ffprobe(&fixture.config).unwrap();
    let version = ffprobe.version().unwrap();
    assert_eq!(version.short_version(), "6.1.1");

    let ffmpeg = Tool::ffmpeg(&fixture.config).unwrap();
    assert_eq!(
        ffmpeg.version().unwrap().version,
        "3.2 Copyright (c) 2000-2016 the FFmpeg developers"
    );
}

#[test]
fn test_devices_real_process() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let ffmpeg = Tool::ffmpeg(&fixture.config).unwrap();
    let devices = ffmpeg.devices().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "alsa");
}

#[test]
fn test_already_exists_kills_waiting_process() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let ffmpeg = Tool::ffmpeg(&fixture.config).unwrap();

    let started = Instant::now();
    let err = ffmpeg
        .run(["-i", "in.mkv", "out.mkv"], &SignatureSet::video_errors())
        .unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(20));
    assert!(err.is_already_exists());
    let tool_error = err.tool_error().unwrap();
    assert_eq!(*tool_error.kind(), ErrorKind::OutputAlreadyExists);
    assert_eq!(tool_error.path(), Some("out.mkv"));
}

#[test]
fn test_successful_run() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = fixture();
    let ffmpeg = Tool::ffmpeg(&fixture.config).unwrap();
    ffmpeg
        .run(["-y", "-i", "in.mkv", "out.mkv"], &SignatureSet::video_errors())
        .unwrap();
}

#[test]
fn test_missing_executable() {
    let config = ToolConfig::new().with_ffmpeg_path("/nonexistent/bin/ffmpeg");
    assert!(matches!(
        Tool::ffmpeg(&config),
        Err(CoreError::ExecutableMissing(_))
    ));
}
