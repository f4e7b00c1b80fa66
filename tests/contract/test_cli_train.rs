use chatvec::embedding::EmbeddingModel;
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

const SENTENCES: &str = r#"[
  ["lỗi", "biên", "dịch", "rust"],
  ["sửa", "lỗi", "kiểu", "dữ", "liệu"],
  ["vòng", "lặp", "python"],
  ["lỗi", "vòng", "lặp"]
]"#;

#[test]
fn test_train_writes_model() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sentences.json"), SENTENCES).unwrap();

    let output = run_chatvec(
        dir.path(),
        &[
            "train",
            "--data",
            "sentences.json",
            "--output",
            "out/w2v.model",
            "--vector-size",
            "8",
            "--workers",
            "2",
            "--sg",
            "0",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Vocabulary size: 11"));
    assert!(stdout.contains("Algorithm: CBOW"));
    assert!(stdout.contains("\"lỗi\""));

    let model = EmbeddingModel::load(dir.path().join("out").join("w2v.model")).unwrap();
    assert_eq!(model.vector_size(), 8);
    assert_eq!(model.len(), 11);
}

#[test]
fn test_train_default_paths() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("models")).unwrap();
    std::fs::write(
        dir.path().join("models").join("training_data_word2vec.json"),
        SENTENCES,
    )
    .unwrap();

    let output = run_chatvec(dir.path(), &["train", "--vector-size", "4", "--workers", "1"]);
    assert!(output.status.success());
    assert!(dir.path().join("models").join("word2vec.model").exists());
}

#[test]
fn test_train_config_file_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sentences.json"), SENTENCES).unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[train]\nvector_size = 6\nworkers = 1\n",
    )
    .unwrap();

    let output = run_chatvec(
        dir.path(),
        &["train", "--data", "sentences.json", "--output", "m.model"],
    );
    assert!(output.status.success());

    let model = EmbeddingModel::load(dir.path().join("m.model")).unwrap();
    assert_eq!(model.vector_size(), 6);
}

#[test]
fn test_train_empty_sentences_exits_1() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("empty.json"), "[]").unwrap();

    let output = run_chatvec(
        dir.path(),
        &["train", "--data", "empty.json", "--output", "models/word2vec.model"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[Word2Vec]"));
    assert!(!dir.path().join("models").join("word2vec.model").exists());
}

#[test]
fn test_train_missing_data_exits_1() {
    let dir = TempDir::new().unwrap();

    let output = run_chatvec(dir.path(), &["train", "--data", "nope.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}

#[test]
fn test_train_oversized_vector_size_exits_1() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sentences.json"), SENTENCES).unwrap();

    for vector_size in ["4611686018427387904", "10000000000000"] {
        let output = run_chatvec(
            dir.path(),
            &[
                "train",
                "--data",
                "sentences.json",
                "--output",
                "m.model",
                "--vector-size",
                vector_size,
                "--workers",
                "1",
            ],
        );
        assert_eq!(output.status.code(), Some(1), "vector size {vector_size}");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("[Word2Vec]"));
        assert!(stderr.contains("vector_size"));
        assert!(!dir.path().join("m.model").exists());
    }
}
