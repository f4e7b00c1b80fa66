use chatvec::embedding::{Algorithm, EmbeddingModel, TrainingParams, Word2VecTrainer};
use chatvec::models::Sentence;
use chatvec::services::{QueryService, TrainRequest, TrainService};
use chatvec::ChatVecError;
use tempfile::TempDir;

fn corpus() -> Vec<Sentence> {
    let raw: &[&[&str]] = &[
        &["lỗi", "biên", "dịch", "rust"],
        &["sửa", "lỗi", "kiểu", "dữ", "liệu"],
        &["vòng", "lặp", "python"],
        &["lỗi", "vòng", "lặp", "vô", "hạn"],
        &["rust", "borrow", "checker"],
    ];
    raw.iter()
        .map(|s| s.iter().map(|w| w.to_string()).collect())
        .collect()
}

fn small_params() -> TrainingParams {
    TrainingParams::new()
        .with_vector_size(16)
        .with_window(2)
        .with_workers(2)
        .with_epochs(3)
}

#[tokio::test]
async fn test_train_file_then_query() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("sentences.json");
    std::fs::write(&data, serde_json::to_string(&corpus()).unwrap()).unwrap();
    let output = dir.path().join("out").join("word2vec.model");

    let service = TrainService::new(Word2VecTrainer::new());
    let response = service
        .train_file(TrainRequest {
            data_path: data,
            output_path: output.clone(),
            params: small_params(),
        })
        .await
        .unwrap();

    assert_eq!(response.sentences_read, 5);
    assert_eq!(response.vector_size, 16);
    assert_eq!(response.sample_words.len(), 10);
    assert_eq!(response.sample_words[0], "lỗi");
    assert!(output.exists());

    let query = QueryService::load(&output).unwrap();
    assert_eq!(query.model().len(), response.vocab_size);
    assert_eq!(
        query.model().metadata().params.as_ref().map(|p| p.vector_size),
        Some(16)
    );
    assert!(query.model().metadata().trained_at.is_some());

    let single = query.sentence_vector(&["rust"]);
    assert_eq!(single, query.model().get("rust").unwrap().to_vec());

    let unknown = query.sentence_vector(&["không_tồn_tại"]);
    assert_eq!(unknown, vec![0.0; 16]);

    let mixed = query.sentence_vector(&["rust", "không_tồn_tại"]);
    assert_eq!(mixed, single);
}

#[tokio::test]
async fn test_cbow_trains_too() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cbow.model");

    let service = TrainService::new(Word2VecTrainer::new());
    let params = small_params().with_algorithm(Algorithm::Cbow);
    let response = service
        .train_sentences(corpus(), params, &output)
        .await
        .unwrap();

    let model = EmbeddingModel::load(&output).unwrap();
    assert_eq!(model.len(), response.vocab_size);
    assert!(model.words().all(|w| model.get(w).unwrap().iter().all(|v| v.is_finite())));
}

#[tokio::test]
async fn test_empty_sentences_write_no_model() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("models").join("word2vec.model");

    let service = TrainService::new(Word2VecTrainer::new());
    let result = service
        .train_sentences(Vec::new(), small_params(), &output)
        .await;

    assert!(matches!(result, Err(ChatVecError::EmptyDataset { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_min_count_above_every_frequency() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("word2vec.model");

    let service = TrainService::new(Word2VecTrainer::new());
    let params = small_params().with_min_count(50);
    let result = service.train_sentences(corpus(), params, &output).await;

    assert!(matches!(result, Err(ChatVecError::EmptyDataset { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_invalid_hyperparameters() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("word2vec.model");
    let service = TrainService::new(Word2VecTrainer::new());

    for params in [
        small_params().with_vector_size(0),
        small_params().with_window(0),
        small_params().with_workers(0),
    ] {
        let result = service.train_sentences(corpus(), params, &output).await;
        assert!(matches!(result, Err(ChatVecError::InvalidParameter { .. })));
    }
    assert!(!output.exists());
}

#[test]
fn test_query_example_vectors() {
    let model =
        EmbeddingModel::from_vectors(2, [("lỗi", vec![1.0, 2.0]), ("sửa", vec![3.0, 4.0])])
            .unwrap();
    let query = QueryService::new(model);

    let words = QueryService::parse_words(r#"["lỗi","sửa"]"#).unwrap();
    assert_eq!(query.sentence_vector(&words), vec![2.0, 3.0]);

    let words = QueryService::parse_words(r#"["không_tồn_tại"]"#).unwrap();
    assert_eq!(query.sentence_vector(&words), vec![0.0, 0.0]);
}
