//! Tests for chunk value types and the stream wrap constructors.

use chunk_mill::chunk::{DecodedChunk, EncodedChunk, Encoding};
use chunk_mill::error::Error;
use chunk_mill::stream;

fn raw_bytes() -> Vec<Vec<u8>> {
    vec![
        b"Hello, world!".to_vec(),
        b"Foo bar!".to_vec(),
        Vec::new(),
        b"Baz qux! 123".to_vec(),
    ]
}

fn raw_texts() -> Vec<String> {
    vec![
        "Hello, world!".to_string(),
        "Foo bar!".to_string(),
        String::new(),
        "Baz qux! 123".to_string(),
    ]
}

#[test]
fn test_encoding_parses_and_displays() {
    assert_eq!("utf-8".parse::<Encoding>().expect("known encoding"), Encoding::Utf8);
    assert_eq!("UTF8".parse::<Encoding>().expect("known encoding"), Encoding::Utf8);
    assert_eq!(Encoding::Utf8.to_string(), "utf-8");
    assert!(matches!(
        "latin-1".parse::<Encoding>(),
        Err(Error::UnsupportedEncoding(name)) if name == "latin-1"
    ));
}

#[test]
fn test_encoded_chunk_span_matches_data_length() {
    let chunk = EncodedChunk::new(b"Hello".to_vec(), 74, Encoding::Utf8);

    assert_eq!(chunk.start(), 74);
    assert_eq!(chunk.end(), 79);
    assert_eq!(chunk.end() - chunk.start(), chunk.len() as u64);
}

#[test]
fn test_decoded_chunk_span_counts_encoded_bytes() {
    // 'é' is two bytes encoded, one char decoded.
    let chunk = DecodedChunk::new("é foo".to_string(), 13, Encoding::Utf8);

    assert_eq!(chunk.end(), 13 + 6);
    assert_eq!(chunk.byte_len(), 6);
}

#[test]
fn test_wrap_encoded_given_no_chunks() {
    let wrapped: Vec<_> = stream::encoded(Vec::new(), 0, Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");
    assert!(wrapped.is_empty());
}

#[test]
fn test_wrap_encoded_given_one_chunk() {
    let wrapped: Vec<_> = stream::encoded(vec![b"Hello, world!".to_vec()], 0, Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    assert_eq!(wrapped, vec![EncodedChunk::new(b"Hello, world!".to_vec(), 0, Encoding::Utf8)]);
}

#[test]
fn test_wrap_encoded_numbers_chunks_contiguously() {
    let wrapped: Vec<_> = stream::encoded(raw_bytes(), 0, Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    let mut expected_start = 0;
    for (chunk, raw) in wrapped.iter().zip(raw_bytes()) {
        assert_eq!(chunk.start(), expected_start);
        assert_eq!(chunk.data(), raw.as_slice());
        expected_start = chunk.end();
    }
}

#[test]
fn test_wrap_encoded_given_start_offset() {
    let wrapped: Vec<_> = stream::encoded(raw_bytes(), 74, Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    assert_eq!(wrapped[0].start(), 74);
    assert_eq!(wrapped[1].start(), 87);
    assert_eq!(wrapped[2].start(), 95);
    assert_eq!(wrapped[2].end(), 95);
    assert_eq!(wrapped[3].start(), 95);
}

#[test]
fn test_wrap_encoded_given_explicit_starts() {
    let starts = vec![74, 100, 43, 300];
    let wrapped: Vec<_> = stream::encoded_at(raw_bytes(), starts.clone(), Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    for ((chunk, raw), start) in wrapped.iter().zip(raw_bytes()).zip(starts) {
        assert_eq!(chunk.start(), start);
        assert_eq!(chunk.end(), start + raw.len() as u64);
    }
}

#[test]
fn test_wrap_encoded_given_mismatched_starts() {
    let result: chunk_mill::Result<Vec<_>> =
        stream::encoded_at(raw_bytes(), vec![74, 100], Encoding::Utf8).collect();

    assert!(matches!(result, Err(Error::StartsMismatch)));
}

#[test]
fn test_wrap_encoded_ends_after_mismatch() {
    let mut wrapped = stream::encoded_at(raw_bytes(), vec![74], Encoding::Utf8);

    assert!(wrapped.next().expect("first chunk").is_ok());
    assert!(wrapped.next().expect("mismatch item").is_err());
    assert!(wrapped.next().is_none());
}

#[test]
fn test_wrap_decoded_numbers_chunks_contiguously() {
    let wrapped: Vec<_> = stream::decoded(raw_texts(), 43, Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    let mut expected_start = 43;
    for (chunk, raw) in wrapped.iter().zip(raw_texts()) {
        assert_eq!(chunk.start(), expected_start);
        assert_eq!(chunk.text(), raw);
        assert_eq!(chunk.end(), expected_start + raw.len() as u64);
        expected_start = chunk.end();
    }
}

#[test]
fn test_wrap_decoded_given_explicit_starts() {
    let starts = vec![74, 100, 43, 300];
    let wrapped: Vec<_> = stream::decoded_at(raw_texts(), starts.clone(), Encoding::Utf8)
        .collect::<chunk_mill::Result<_>>()
        .expect("no errors");

    for ((chunk, raw), start) in wrapped.iter().zip(raw_texts()).zip(starts) {
        assert_eq!(chunk.start(), start);
        assert_eq!(chunk.end(), start + raw.len() as u64);
    }
}

#[test]
fn test_wrap_decoded_given_mismatched_starts() {
    let result: chunk_mill::Result<Vec<_>> =
        stream::decoded_at(raw_texts(), vec![1u64, 2, 3, 4, 5], Encoding::Utf8).collect();

    assert!(matches!(result, Err(Error::StartsMismatch)));
}
