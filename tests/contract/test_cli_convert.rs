use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_chatvec(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chatvec"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("CHATVEC_CONFIG", dir.join("config.toml"))
        .env_remove("CHATVEC_MODELS_DIR")
        .output()
        .unwrap()
}

#[test]
fn test_convert_with_default_paths() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("models")).unwrap();
    std::fs::write(
        dir.path().join("models").join("training_data.json"),
        r#"[{"question": "Sửa lỗi Rust", "answer": "Đọc thông báo", "tags": ["rust"]}]"#,
    )
    .unwrap();

    let output = run_chatvec(dir.path(), &["convert"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[Convert]"));
    assert!(stdout.contains("3 sentences"));

    let written =
        std::fs::read_to_string(dir.path().join("models").join("training_data_word2vec.json"))
            .unwrap();
    let sentences: Vec<Vec<String>> = serde_json::from_str(&written).unwrap();
    assert_eq!(
        sentences,
        vec![vec!["sửa", "lỗi", "rust"], vec!["đọc", "thông", "báo"], vec!["rust"]]
    );
}

#[test]
fn test_convert_explicit_paths() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.json"), "[]").unwrap();

    let output = run_chatvec(dir.path(), &["convert", "in.json", "out/sentences.json"]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(dir.path().join("out").join("sentences.json")).unwrap();
    assert_eq!(written, "[]");
}

#[test]
fn test_convert_missing_input_exits_1() {
    let dir = TempDir::new().unwrap();

    let output = run_chatvec(dir.path(), &["convert", "missing.json"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[Convert]"));
    assert!(stderr.contains("missing.json"));
}

#[test]
fn test_convert_invalid_json_exits_1() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.json"), "{\"question\":").unwrap();

    let output = run_chatvec(dir.path(), &["convert", "bad.json", "out.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("out.json").exists());
}
