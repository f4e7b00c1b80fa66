pub mod convert_service;
pub mod query_service;
pub mod similarity_service;
pub mod tokenizer;
pub mod train_service;

pub use convert_service::{ConvertOptions, ConvertResponse, ConvertService};
pub use query_service::QueryService;
pub use similarity_service::{keyword_matches, MatchMethod, SimilarMatch, SimilarityService};
pub use tokenizer::tokenize;
pub use train_service::{TrainRequest, TrainResponse, TrainService};
