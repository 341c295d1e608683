//! Text analysis for the `content` field.
//!
//! Content and keywords go through the same pipeline so that a keyword matches the
//! tokens it would have produced had it been indexed:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//! 4. `Stemmer` - applies language-specific stemming
//!
//! The stemmer language is configurable via `index.stemmer` in `.scour.toml`.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer,
};

use crate::IndexError;

/// Name of the content tokenizer registered with Tantivy.
pub const CONTENT_TOKENIZER: &str = "scour_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Parses a stemmer language name into a Tantivy `Language`.
pub fn parse_stemmer(name: &str) -> Result<Language, IndexError> {
    match name.to_lowercase().as_str() {
        "arabic" => Ok(Language::Arabic),
        "danish" => Ok(Language::Danish),
        "dutch" => Ok(Language::Dutch),
        "english" => Ok(Language::English),
        "finnish" => Ok(Language::Finnish),
        "french" => Ok(Language::French),
        "german" => Ok(Language::German),
        "greek" => Ok(Language::Greek),
        "hungarian" => Ok(Language::Hungarian),
        "italian" => Ok(Language::Italian),
        "norwegian" => Ok(Language::Norwegian),
        "portuguese" => Ok(Language::Portuguese),
        "romanian" => Ok(Language::Romanian),
        "russian" => Ok(Language::Russian),
        "spanish" => Ok(Language::Spanish),
        "swedish" => Ok(Language::Swedish),
        "tamil" => Ok(Language::Tamil),
        "turkish" => Ok(Language::Turkish),
        other => Err(IndexError::InvalidStemmer(other.to_string())),
    }
}

/// Builds the content analyzer for a stemmer language.
pub fn build_analyzer(language: Language) -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(Stemmer::new(language))
        .build()
}

/// Runs `text` through the analyzer and returns the resulting tokens in order.
pub fn analyze(analyzer: &TextAnalyzer, text: &str) -> Vec<String> {
    let mut analyzer = analyzer.clone();
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(parse_stemmer("English").unwrap(), Language::English);
        assert_eq!(parse_stemmer("DANISH").unwrap(), Language::Danish);
    }

    #[test]
    fn parse_rejects_unknown_language() {
        let err = parse_stemmer("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn analyze_lowercases_and_stems() {
        let analyzer = build_analyzer(Language::English);
        assert_eq!(analyze(&analyzer, "Running HANDLING"), vec!["run", "handl"]);
    }

    #[test]
    fn analyze_drops_punctuation_and_long_tokens() {
        let analyzer = build_analyzer(Language::English);
        let long_token = "x".repeat(50);
        let text = format!("mountain-bike, {long_token}!");
        assert_eq!(analyze(&analyzer, &text), vec!["mountain", "bike"]);
    }

    #[test]
    fn analyze_punctuation_only_is_empty() {
        let analyzer = build_analyzer(Language::English);
        assert!(analyze(&analyzer, "!!! ...").is_empty());
    }
}
