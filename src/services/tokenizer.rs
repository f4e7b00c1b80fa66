//! Text normalization for Vietnamese/English chatbot content
//!
//! Markdown code is dropped, emphasis markers are unwrapped, everything that
//! is not a letter, a number or `_` becomes a separator, and short tokens and
//! stopwords are removed. Combining marks and connector punctuation other
//! than `_` count as separators, so text is expected in composed form.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::models::Sentence;

/// Vietnamese letters carrying diacritics, kept explicitly alongside `\p{L}`
pub const VIETNAMESE_LETTERS: &str =
    "àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ";

/// Mixed Vietnamese/English stopwords removed from every sentence
pub const STOPWORDS: &[&str] = &[
    "là", "cái", "tôi", "bạn", "có", "không", "gì", "nào", "được", "cách", "sao", "làm", "hỏi",
    "muốn", "cần", "nó", "nên", "thì", "này", "kia", "ở", "đó", "đây", "và", "hay", "hay là",
    "hoặc", "nhưng", "mà", "vì", "cho", "để", "nếu", "khi", "giống", "như", "cũng", "lại", "chỉ",
    "khoảng", "từ", "đến", "với", "trong", "trên", "dưới", "sau", "trước", "a", "an", "the", "is",
    "are", "was", "were", "be", "been", "have", "has", "do", "does",
];

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"```[\s\S]*?```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    static ref SEPARATORS: Regex =
        Regex::new(&format!(r"[^\p{{L}}\p{{N}}_\s{VIETNAMESE_LETTERS}]")).unwrap();
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

/// Returns true if `word` (already lowercased) is a stopword
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Strips markdown code and emphasis, keeping the emphasized text
pub fn strip_markdown(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    ITALIC.replace_all(&text, "$1").into_owned()
}

/// Splits free text into normalized tokens
///
/// Tokens are lowercase, at least two characters long, and never stopwords.
/// Empty input yields an empty sentence.
///
/// # Example
/// ```
/// use chatvec::services::tokenizer::tokenize;
///
/// let tokens = tokenize("Làm sao để sửa **lỗi** `NullPointerException`?");
/// assert_eq!(tokens, vec!["sửa", "lỗi"]);
/// ```
pub fn tokenize(text: &str) -> Sentence {
    if text.is_empty() {
        return Vec::new();
    }

    let text = strip_markdown(text).to_lowercase();
    let text = SEPARATORS.replace_all(&text, " ");

    text.split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .filter(|word| !is_stopword(word))
        .map(str::to_string)
        .collect()
}
