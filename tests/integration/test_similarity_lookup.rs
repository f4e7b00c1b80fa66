use chatvec::embedding::EmbeddingModel;
use chatvec::services::similarity_service::KEYWORD_MATCH_SCORE;
use chatvec::services::{ConvertService, MatchMethod, SimilarityService};
use tempfile::TempDir;

const RECORDS: &str = r#"[
    {"question": "Lỗi biên dịch Rust", "answer": "Kiểm tra kiểu", "tags": ["rust"], "priority": 2, "usageCount": 1},
    {"question": "Vòng lặp for trong Python", "answer": "Dùng range", "tags": ["python"], "priority": 1},
    {"question": "Vòng lặp while", "answer": "Điều kiện dừng", "tags": ["loop"], "isActive": false},
    {"question": "???", "answer": "không có câu hỏi", "tags": []},
    {"question": "Con trỏ null", "answer": "Dùng Option", "tags": ["rust"], "priority": 2, "usageCount": 9}
]"#;

fn model() -> EmbeddingModel {
    EmbeddingModel::from_vectors(
        3,
        [
            ("lỗi", vec![1.0, 0.0, 0.0]),
            ("biên", vec![0.9, 0.1, 0.0]),
            ("dịch", vec![1.0, 0.0, 0.1]),
            ("vòng", vec![0.0, 1.0, 0.0]),
            ("lặp", vec![0.0, 0.9, 0.1]),
            ("python", vec![0.1, 1.0, 0.0]),
            ("for", vec![0.0, 1.0, 0.0]),
            ("while", vec![0.0, 1.0, 0.0]),
        ],
    )
    .unwrap()
}

async fn load_records() -> Vec<chatvec::models::TrainingRecord> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("training_data.json");
    std::fs::write(&path, RECORDS).unwrap();
    ConvertService::read_records(&path).await.unwrap()
}

#[tokio::test]
async fn test_embedding_lookup_skips_inactive() {
    let records = load_records().await;
    let service = SimilarityService::new(Some(model()));

    let matches = service.find_similar("cách viết vòng lặp", &records, 3);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.question, "Vòng lặp for trong Python");
    assert_eq!(matches[0].method, MatchMethod::Embedding);
    assert!(matches[0].similarity > 0.3);
}

#[tokio::test]
async fn test_embedding_lookup_respects_limit() {
    let records = load_records().await;
    let service = SimilarityService::new(Some(model())).with_threshold(-1.0);

    let matches = service.find_similar("lỗi biên dịch", &records, 2);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].record.question, "Lỗi biên dịch Rust");
    assert!(matches[0].similarity >= matches[1].similarity);
}

#[tokio::test]
async fn test_keyword_fallback_by_tag_and_priority() {
    let records = load_records().await;
    let service = SimilarityService::new(None);

    let matches = service.find_similar("giúp tôi với rust", &records, 3);

    let questions: Vec<&str> = matches.iter().map(|m| m.record.question.as_str()).collect();
    assert_eq!(questions, vec!["Con trỏ null", "Lỗi biên dịch Rust"]);
    assert!(matches
        .iter()
        .all(|m| m.method == MatchMethod::Keyword && m.similarity == KEYWORD_MATCH_SCORE));
}

#[tokio::test]
async fn test_unknown_words_fall_back_to_keywords() {
    let records = load_records().await;
    let service = SimilarityService::new(Some(model()));

    let matches = service.find_similar("dùng option", &records, 3);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].record.question, "Con trỏ null");
    assert_eq!(matches[0].method, MatchMethod::Keyword);
}

#[tokio::test]
async fn test_nothing_matches() {
    let records = load_records().await;
    let service = SimilarityService::new(Some(model()));

    assert!(service
        .find_similar("thời tiết hôm nay", &records, 3)
        .is_empty());
}
