//! Tests for the split-character healing decoder.

use chunk_mill::chunk::{DecodedChunk, Encoding};
use chunk_mill::error::Error;
use chunk_mill::stream::{self, SplitCharHealer};

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

/// Every way to split a multi-byte encoded character in two.
fn splits() -> impl Iterator<Item = (&'static [u8], &'static [u8])> {
    UTF8_CHARS
        .iter()
        .flat_map(|ch| (1..ch.len()).map(move |split| (&ch[..split], &ch[split..])))
}

fn decode_contiguous(raw: Vec<Vec<u8>>) -> chunk_mill::Result<Vec<DecodedChunk>> {
    SplitCharHealer::new(stream::encoded(raw, 0, Encoding::Utf8)).collect()
}

fn decode_at(raw: Vec<Vec<u8>>, starts: Vec<u64>) -> chunk_mill::Result<Vec<DecodedChunk>> {
    SplitCharHealer::new(stream::encoded_at(raw, starts, Encoding::Utf8)).collect()
}

fn text(s: &str) -> String {
    s.to_string()
}

#[test]
fn test_decode_given_no_chunks() {
    assert_eq!(decode_contiguous(Vec::new()).expect("clean stream"), Vec::new());
}

#[test]
fn test_decode_given_no_truncations() {
    let decoded = SplitCharHealer::new(stream::encoded(
        vec![b"Hello, world!".to_vec(), b"Foo bar!".to_vec()],
        8,
        Encoding::Utf8,
    ))
    .collect::<chunk_mill::Result<Vec<_>>>()
    .expect("clean stream");

    assert_eq!(
        decoded,
        vec![
            DecodedChunk::new(text("Hello, world!"), 8, Encoding::Utf8),
            DecodedChunk::new(text("Foo bar!"), 21, Encoding::Utf8),
        ]
    );
}

#[test]
fn test_decode_given_single_ascii_chunk() {
    let decoded = decode_contiguous(vec![b"Hello, world!".to_vec()]).expect("clean stream");

    assert_eq!(decoded, vec![DecodedChunk::new(text("Hello, world!"), 0, Encoding::Utf8)]);
}

#[test]
fn test_decode_heals_every_split_of_every_boundary_char() {
    for (first, second) in splits() {
        let raw = vec![
            [b"Hello, world!".as_slice(), first].concat(),
            [second, b"Foo bar!".as_slice()].concat(),
        ];

        let whole = [first, second].concat();
        let healed =
            String::from_utf8([whole.as_slice(), b"Foo bar!".as_slice()].concat()).expect("valid char");

        let decoded = decode_contiguous(raw).expect("clean stream");

        assert_eq!(
            decoded,
            vec![
                DecodedChunk::new(text("Hello, world!"), 0, Encoding::Utf8),
                DecodedChunk::new(healed, 13, Encoding::Utf8),
            ],
            "split {first:x?} / {second:x?}"
        );
    }
}

#[test]
fn test_decode_given_two_byte_split_fixture() {
    let decoded = decode_at(
        vec![b"Hello, world!\xc3".to_vec(), b"\xa9 foo".to_vec()],
        vec![0, 14],
    )
    .expect("clean stream");

    assert_eq!(
        decoded,
        vec![
            DecodedChunk::new(text("Hello, world!"), 0, Encoding::Utf8),
            DecodedChunk::new(text("é foo"), 13, Encoding::Utf8),
        ]
    );
    assert_eq!(decoded[1].end(), 20);
}

#[test]
fn test_decode_given_only_split_chunks() {
    for (first, second) in splits() {
        let whole = String::from_utf8([first, second].concat()).expect("valid char");
        let decoded = decode_contiguous(vec![first.to_vec(), second.to_vec()]).expect("clean stream");

        assert_eq!(decoded, vec![DecodedChunk::new(whole, 0, Encoding::Utf8)]);
    }
}

#[test]
fn test_decode_given_multiple_truncations() {
    for (first, second) in splits() {
        let raw = vec![
            first.to_vec(),
            second.to_vec(),
            [b"Hello".as_slice(), first].concat(),
            [second, b"world!".as_slice()].concat(),
            b"Foo bar!".to_vec(),
            first.to_vec(),
        ];

        let ch = String::from_utf8([first, second].concat()).expect("valid char");
        let decoded = decode_contiguous(raw).expect("clean stream");

        let expected_texts = [ch.clone(), text("Hello"), format!("{ch}world!"), text("Foo bar!")];
        let mut expected = Vec::new();
        let mut start = 0;
        for chunk_text in expected_texts {
            let chunk = DecodedChunk::new(chunk_text, start, Encoding::Utf8);
            start = chunk.end();
            expected.push(chunk);
        }

        assert_eq!(decoded, expected, "split {first:x?} / {second:x?}");
    }
}

#[test]
fn test_decode_given_only_continuation_bytes() {
    assert_eq!(decode_contiguous(vec![b"\x80\x80\x80".to_vec()]).expect("clean stream"), Vec::new());
}

#[test]
fn test_decode_given_truncated_continuation_bytes() {
    assert_eq!(
        decode_contiguous(vec![b"\x80\x80\x80".to_vec(), b"\x80".to_vec()]).expect("clean stream"),
        Vec::new()
    );
}

#[test]
fn test_decode_given_invalid_utf8() {
    let result = decode_contiguous(vec![b"Hello, \xffworld!".to_vec()]);

    assert!(matches!(result, Err(Error::Utf8 { byte: 7 })));
}

#[test]
fn test_decode_given_truncated_invalid_utf8() {
    // The carry looks like a 2-byte start, but its continuation is invalid.
    let result = decode_contiguous(vec![b"Hello, world!\xc3".to_vec(), b"\x28 Foo bar!".to_vec()]);

    assert!(matches!(result, Err(Error::Utf8 { .. })));
}

#[test]
fn test_decode_resynchronizes_on_noncontiguous_chunks() {
    for (first, second) in splits() {
        let raw = vec![
            first.to_vec(),
            second.to_vec(),
            [b"Hello".as_slice(), first].concat(),
            [second, b"world!".as_slice()].concat(),
            b"Foo bar!".to_vec(),
            first.to_vec(),
        ];
        let starts = vec![32, 32 + first.len() as u64, 8, 90, 0, 16];

        let ch = String::from_utf8([first, second].concat()).expect("valid char");
        let decoded = decode_at(raw, starts).expect("clean stream");

        // The second and fourth carries are dropped at the gaps: "Hello"'s
        // tail never meets its continuation, and the orphan continuation
        // bytes in front of "world!" are stripped.
        assert_eq!(
            decoded,
            vec![
                DecodedChunk::new(ch.clone(), 32, Encoding::Utf8),
                DecodedChunk::new(text("Hello"), 8, Encoding::Utf8),
                DecodedChunk::new(text("world!"), 90, Encoding::Utf8),
                DecodedChunk::new(text("Foo bar!"), 0, Encoding::Utf8),
            ],
            "split {first:x?} / {second:x?}"
        );
    }
}

#[test]
fn test_decode_drops_carry_at_end_of_stream() {
    let decoded = decode_contiguous(vec![b"Hello".to_vec(), b"\xc3".to_vec()]).expect("clean stream");

    assert_eq!(decoded, vec![DecodedChunk::new(text("Hello"), 0, Encoding::Utf8)]);
}

#[test]
fn test_decode_passes_wrap_errors_through() {
    let result: chunk_mill::Result<Vec<_>> = SplitCharHealer::new(stream::encoded_at(
        vec![b"Hello".to_vec(), b" world".to_vec()],
        vec![0],
        Encoding::Utf8,
    ))
    .collect();

    assert!(matches!(result, Err(Error::StartsMismatch)));
}
