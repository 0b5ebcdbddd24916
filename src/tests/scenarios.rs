use crate::codec::{compress, decompress, Codec};
use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::operator::Operator;
use crate::packed;
use crate::selector::min_applicable_ops;

#[test]
fn test_plain_sentence() {
    let dict = Dictionary::from_word_list("the\ncat\nsat").unwrap();
    let text = "The cat sat.";
    let (bytes, stats) = Codec::new(&dict).compress_with_stats(text).unwrap();

    assert_eq!(stats.dictionary_fields, 3);
    assert_eq!(stats.literal_blocks, 0);
    // Info byte announcing Capitalize for the first word
    assert_eq!(&bytes[..2], &[0x01, 0x20]);
    // The last index field is preceded by the packed period
    assert_eq!(&bytes[bytes.len() - 2..], &[0x04, 0x02]);

    let restored = decompress(&bytes, &dict).unwrap();
    assert_eq!(restored, text);
    assert!(!restored.ends_with(' '));
}

#[test]
fn test_shouting_with_punctuation() {
    let dict = Dictionary::from_word_list("stop").unwrap();
    let ops = min_applicable_ops("STOP!", &dict);
    assert_eq!(ops.to_vec(), vec![Operator::AllCaps, Operator::Exclamation]);

    // Casing 2 in bits 6-5, punctuation 4 in bits 4-2
    assert_eq!(packed::encode(&ops).as_slice(), &[0b0101_0000]);

    let bytes = compress("STOP!", &dict).unwrap();
    assert_eq!(bytes, vec![0x01, 0x50, 0x00]);
    assert_eq!(decompress(&bytes, &dict).unwrap(), "STOP!");
}

#[test]
fn test_unknown_word() {
    let dict = Dictionary::from_word_list("yes").unwrap();
    let text = "Supercalifragilisticexpialidocious yes";
    let (bytes, stats) = Codec::new(&dict).compress_with_stats(text).unwrap();

    assert_eq!(stats.literal_blocks, 1);
    assert_eq!(stats.dictionary_fields, 1);
    assert_eq!(stats.literal_bytes, 34);
    // Packed literal flag, then the length prefix
    assert_eq!(&bytes[..4], &[0x01, 0x80, 0x20, 34]);
    assert_eq!(decompress(&bytes, &dict).unwrap(), text);
}

#[test]
fn test_empty_input() {
    let dict = Dictionary::builtin();
    assert!(compress("", &dict).unwrap().is_empty());
    assert_eq!(decompress(&[], &dict).unwrap(), "");
}

#[test]
fn test_builtin_prose() {
    let dict = Dictionary::builtin();
    let text = "\"Hello,\" said the man. \"Come here!\"\n\nThe old dog did not move\u{2026}\tIt was COLD.";
    let codec = Codec::new(&dict);
    let (bytes, stats) = codec.compress_with_stats(text).unwrap();

    assert!(bytes.len() < text.len());
    assert!(stats.dictionary_fields > stats.literal_blocks);
    assert_eq!(codec.decompress(&bytes).unwrap(), text);
}

#[test]
fn test_shared_dictionary_across_threads() {
    let dict = Dictionary::builtin();
    let texts = ["the cat sat", "Hello world!", "STOP.\nyes"];

    std::thread::scope(|scope| {
        for text in texts {
            let dict = &dict;
            scope.spawn(move || {
                let bytes = compress(text, dict).unwrap();
                assert_eq!(decompress(&bytes, dict).unwrap(), text);
            });
        }
    });
}

#[test]
fn test_truncated_stream_keeps_prefix() {
    let dict = Dictionary::from_word_list("yes").unwrap();
    let text = "zebra yes";
    let codec = Codec::new(&dict);
    let bytes = codec.compress(text).unwrap();
    // info, packed literal flag, length, payload, continuation, index
    assert_eq!(bytes.len(), 11);

    for cut in 0..=bytes.len() {
        match codec.decompress_with_warnings(&bytes[..cut]) {
            Ok(out) => assert!(text.starts_with(&out.text), "cut {cut}: {:?}", out.text),
            Err(err) => assert!(
                matches!(err, Error::TruncatedLiteralBlock { .. }),
                "cut {cut}: {err:?}"
            ),
        }
    }

    // Payload cut short inside the literal block
    assert!(matches!(
        codec.decompress(&bytes[..6]),
        Err(Error::TruncatedLiteralBlock { offset: 3, declared: 5, available: 2 })
    ));
    // Missing continuation byte stops after the complete literal
    let out = codec.decompress_with_warnings(&bytes[..9]).unwrap();
    assert_eq!(out.text, "zebra");
    assert!(!out.is_clean());
}
