//! Tests for the `PipelineOptions` builder.

use chunk_mill::error::Error;
use chunk_mill::{CharSet, PipelineOptions};

#[test]
fn test_defaults() {
    let options = PipelineOptions::default();

    assert_eq!(options.min_tokens(), 50);
    assert_eq!(options.max_tokens(), 200);
    assert_eq!(options.token_encoding(), "cl100k_base");
    assert!(options.word_delimiters().contains(' '));
    assert!(options.word_delimiters().contains('—'));
    assert!(options.preferred_delimiters().contains('.'));
    assert!(!options.preferred_delimiters().contains(','));
}

#[test]
fn test_builder_chaining() {
    let options = PipelineOptions::default()
        .with_min_tokens(10)
        .with_max_tokens(40)
        .with_token_encoding("o200k_base")
        .with_preferred_delimiters(CharSet::new(".\n"))
        .with_word_delimiters(CharSet::new(" "));

    assert_eq!(options.min_tokens(), 10);
    assert_eq!(options.max_tokens(), 40);
    assert_eq!(options.token_encoding(), "o200k_base");
    assert_eq!(options.preferred_delimiters(), &CharSet::new(".\n"));
    assert_eq!(options.word_delimiters(), &CharSet::new(" "));
}

#[test]
fn test_new_sets_bounds() {
    let options = PipelineOptions::new(15, 25);

    assert_eq!(options.min_tokens(), 15);
    assert_eq!(options.max_tokens(), 25);
    assert_eq!(options.token_encoding(), "cl100k_base");
}

#[test]
fn test_validate_accepts_sane_bounds() {
    assert!(PipelineOptions::new(1, 1).validate().is_ok());
    assert!(PipelineOptions::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_minimum() {
    assert!(matches!(
        PipelineOptions::new(0, 10).validate(),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_validate_rejects_inverted_bounds() {
    assert!(matches!(
        PipelineOptions::new(30, 10).validate(),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_options_round_trip_through_serde() {
    let options = PipelineOptions::new(15, 25).with_token_encoding("o200k_base");
    let json = serde_json::to_string(&options).expect("serialize");
    let back: PipelineOptions = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, options);
}
