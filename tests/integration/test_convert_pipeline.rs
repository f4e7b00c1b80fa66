use chatvec::models::TrainingRecord;
use chatvec::services::convert_service::DEFAULT_ANSWER_CHAR_LIMIT;
use chatvec::services::{ConvertOptions, ConvertService};
use chatvec::ChatVecError;
use tempfile::TempDir;

fn write_records(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("training_data.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[tokio::test]
async fn test_convert_file_writes_pretty_utf8() {
    let dir = TempDir::new().unwrap();
    let input = write_records(
        &dir,
        r#"[
            {"question": "Lỗi biên dịch Rust", "answer": "Kiểm tra **kiểu** dữ liệu", "tags": ["compiler"]},
            {"question": "", "answer": "", "tags": []}
        ]"#,
    );
    let output = dir.path().join("nested").join("out.json");

    let response = ConvertService::new()
        .convert_file(&input, &output)
        .await
        .unwrap();

    assert_eq!(response.records_read, 2);
    assert_eq!(response.sentences_written, 3);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"lỗi\""), "non-ASCII must be kept verbatim");
    assert!(written.starts_with("[\n  [\n    \"lỗi\""));

    let sentences: Vec<Vec<String>> = serde_json::from_str(&written).unwrap();
    assert_eq!(
        sentences,
        vec![
            vec!["lỗi", "biên", "dịch", "rust"],
            vec!["kiểm", "tra", "kiểu", "dữ", "liệu"],
            vec!["compiler"],
        ]
    );
}

#[test]
fn test_answer_truncated_before_tokenizing() {
    let answer = format!("{}tail", "ư".repeat(DEFAULT_ANSWER_CHAR_LIMIT - 2));
    let records = vec![TrainingRecord::new("", answer)];

    let sentences = ConvertService::new().convert_records(&records);
    assert_eq!(sentences.len(), 1);
    assert!(sentences[0][0].ends_with("ta"));
    assert!(!sentences[0][0].contains("tail"));

    let custom = ConvertService::with_options(ConvertOptions {
        answer_char_limit: 10_000,
    });
    let sentences = custom.convert_records(&records);
    assert!(sentences[0][0].ends_with("tail"));
}

#[tokio::test]
async fn test_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = ConvertService::new()
        .convert_file(dir.path().join("nope.json"), dir.path().join("out.json"))
        .await;

    assert!(matches!(result, Err(ChatVecError::Io(_))));
    assert!(!dir.path().join("out.json").exists());
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_records(&dir, "{not json");

    let result = ConvertService::new()
        .convert_file(&input, dir.path().join("out.json"))
        .await;
    assert!(matches!(result, Err(ChatVecError::Json(_))));
}
