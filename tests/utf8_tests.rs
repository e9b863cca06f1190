//! Tests for the bit-level UTF-8 helpers.

use chunk_mill::utf8::{
    MAX_CONTINUATION_BYTES_PER_CHAR, is_continuation, leading_continuation_count,
    lstrip_continuation, rstrip_continuation, strip_continuation, trailing_continuation_count,
    truncation_point,
};

/// Encoded characters at the boundaries of each UTF-8 sequence length.
const UTF8_CHARS: &[&[u8]] = &[
    b"\x00",
    b"\x7f",
    b"\xc2\x80",
    b"\xdf\xbf",
    b"\xe0\xa0\x80",
    b"\xef\xbf\xbf",
    b"\xf0\x90\x80\x80",
    b"\xf4\x8f\xbf\xbf",
];

/// Every strict prefix of an encoded character (a truncation).
fn truncations() -> impl Iterator<Item = &'static [u8]> {
    UTF8_CHARS
        .iter()
        .flat_map(|ch| (1..ch.len()).map(move |split| &ch[..split]))
}

#[test]
fn test_is_continuation_given_continuation_byte() {
    assert!(is_continuation(0x80));
    assert!(is_continuation(0xbf));
}

#[test]
fn test_is_continuation_given_non_continuation_byte() {
    assert!(!is_continuation(0x00));
    assert!(!is_continuation(b'a'));
    assert!(!is_continuation(0xc2));
    assert!(!is_continuation(0xf4));
}

#[test]
fn test_leading_continuation_count_given_empty_bytes() {
    assert_eq!(leading_continuation_count(b""), 0);
}

#[test]
fn test_leading_continuation_count_given_only_continuation_bytes() {
    for count in 1..=MAX_CONTINUATION_BYTES_PER_CHAR {
        let bytes = vec![0x80; count];
        assert_eq!(leading_continuation_count(&bytes), count);
    }
}

#[test]
fn test_leading_continuation_count_given_no_continuation_bytes() {
    assert_eq!(leading_continuation_count(b"Hello, world!"), 0);
}

#[test]
fn test_leading_continuation_count_given_mixed_bytes() {
    assert_eq!(leading_continuation_count(b"\x80Hello, world!"), 1);
}

#[test]
fn test_trailing_continuation_count_is_capped() {
    assert_eq!(trailing_continuation_count(&[0x80; 7]), MAX_CONTINUATION_BYTES_PER_CHAR);
}

#[test]
fn test_trailing_continuation_count_given_mixed_bytes() {
    assert_eq!(trailing_continuation_count(b"Hello\x80\x80"), 2);
    assert_eq!(trailing_continuation_count(b"Hello"), 0);
}

#[test]
fn test_truncation_point_given_no_truncation() {
    for &ch in UTF8_CHARS {
        let data = [b"Hello, world!".as_slice(), ch].concat();
        assert_eq!(truncation_point(&data), data.len(), "char {ch:x?}");
    }
}

#[test]
fn test_truncation_point_given_invalid_utf8() {
    // Only suffix truncation is detected, not whole-string validity.
    let data = b"Hello, \xffworld!";
    assert_eq!(truncation_point(data), data.len());
}

#[test]
fn test_truncation_point_given_truncated() {
    let expected = b"Hello, world!";

    for truncation in truncations() {
        let data = [expected.as_slice(), truncation].concat();
        assert_eq!(&data[..truncation_point(&data)], expected, "truncation {truncation:x?}");
    }
}

#[test]
fn test_truncation_point_given_only_continuation_bytes() {
    assert_eq!(truncation_point(b"\x80\x80\x80"), 0);
}

#[test]
fn test_truncation_point_given_only_truncated() {
    for truncation in truncations() {
        assert_eq!(truncation_point(truncation), 0, "truncation {truncation:x?}");
    }
}

#[test]
fn test_lstrip_continuation_given_empty_bytes() {
    assert_eq!(lstrip_continuation(b""), b"");
}

#[test]
fn test_lstrip_continuation_given_no_continuation_bytes() {
    assert_eq!(lstrip_continuation(b"Hello, world!"), b"Hello, world!");
}

#[test]
fn test_lstrip_continuation_given_only_continuation_bytes() {
    assert_eq!(lstrip_continuation(b"\x80\x80\x80"), b"");
}

#[test]
fn test_lstrip_continuation_given_leading_continuation_bytes() {
    assert_eq!(lstrip_continuation(b"\x80Hello, world!"), b"Hello, world!");
}

#[test]
fn test_lstrip_continuation_given_trailing_continuation_bytes() {
    assert_eq!(lstrip_continuation(b"Hello, world!\x80"), b"Hello, world!\x80");
}

#[test]
fn test_rstrip_continuation_given_empty_bytes() {
    assert_eq!(rstrip_continuation(b""), b"");
}

#[test]
fn test_rstrip_continuation_given_only_continuation_bytes() {
    assert_eq!(rstrip_continuation(b"\x80\x80\x80"), b"");
}

#[test]
fn test_rstrip_continuation_given_leading_continuation_bytes() {
    assert_eq!(rstrip_continuation(b"\x80Hello, world!"), b"\x80Hello, world!");
}

#[test]
fn test_rstrip_continuation_given_trailing_continuation_bytes() {
    assert_eq!(rstrip_continuation(b"Hello, world!\x80"), b"Hello, world!");
}

#[test]
fn test_strip_continuation_given_both_sides() {
    assert_eq!(strip_continuation(b"\x80Hello, world!\x80"), b"Hello, world!");
    assert_eq!(strip_continuation(b"\x80\x80\x80"), b"");
    assert_eq!(strip_continuation(b"Hello, world!"), b"Hello, world!");
}
