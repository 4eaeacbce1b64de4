use std::collections::HashMap;
use tinyser::{encoding::MAX_LEAF_LEN, prelude::*};
use tinyser_strategy::*;

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Doc {
    #[tiny = "title"]
    pub title: String,
    #[tiny = "body"]
    pub body: Vec<String>,
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Small {
    #[tiny = "n"]
    pub n: u8,
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Wide {
    #[tiny = "n"]
    pub n: i64,
}

#[derive(TinySerDe, Debug, Default)]
pub struct Huge {
    #[tiny = "n"]
    pub n: i128,
}

#[test]
fn oversized_leaf_names_its_position() {
    let d = Doc {
        title: "ok".into(),
        body: vec!["fine".into(), "x".repeat(MAX_LEAF_LEN + 1)],
    };
    let err = encode_full(&d).unwrap_err();
    assert_eq!(err.stage(), Stage::Encode);
    assert_eq!(
        err.kind(),
        &ErrorKind::LeafOverflow {
            len: MAX_LEAF_LEN + 1
        }
    );
    assert_eq!(err.path_string(), ".body[1]");
    assert_eq!(
        err.to_string(),
        "encode failed at .body[1]: leaf payload of 65536 bytes exceeds the 65535 byte limit"
    );
}

#[test]
fn truncated_input_is_an_error() {
    let enc = encode_full(&all_struct()).unwrap();

    for cut in &[1, 5, enc.len() / 2, enc.len() - 1] {
        let mut dec = AllStruct::default();
        let err = decode_full(enc[..*cut].to_vec(), &mut dec).unwrap_err();
        assert_eq!(err.stage(), Stage::Decode);
        match err.kind() {
            ErrorKind::Truncated { remaining, needed, .. } => assert!(remaining < needed),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn truncation_path_points_into_the_fixture() {
    let t = Testie {
        all: Box::new(AllStruct {
            list_int: vec![1, 2, 3],
            ..AllStruct::default()
        }),
        ..Testie::default()
    };
    let enc = encode_full(&t).unwrap();

    // find the third element of all.list_int and cut in the middle of it
    let mut needle = vec![8u8, 0];
    needle.extend_from_slice(&3i64.to_le_bytes());
    let at = enc
        .windows(needle.len())
        .position(|w| w == &needle[..])
        .unwrap();

    let mut dec = Testie::default();
    let err = decode_full(enc[..at + 4].to_vec(), &mut dec).unwrap_err();
    assert_eq!(err.path_string(), ".all.list_int[2]");
    assert_eq!(
        err.kind(),
        &ErrorKind::Truncated {
            offset: at + 2,
            needed: 8,
            remaining: 2,
        }
    );
}

#[test]
fn count_larger_than_input() {
    let mut dec = Doc::default();
    let bytes = vec![0u8, 0, 0xff, 0xff, 0xff, 0xff];
    let err = decode_full(bytes, &mut dec).unwrap_err();
    assert_eq!(err.path_string(), ".body[0]");
    match err.kind() {
        ErrorKind::Truncated { .. } => (),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn narrowing_is_checked() {
    let enc = encode_full(&Wide { n: 256 }).unwrap();
    let err = decode_full(enc, &mut Small::default()).unwrap_err();
    assert_eq!(err.path_string(), ".n");
    assert_eq!(
        err.kind(),
        &ErrorKind::InvalidLeaf("256 does not fit in u8".into())
    );

    let enc = encode_full(&Wide { n: 255 }).unwrap();
    let mut small = Small::default();
    decode_full(enc, &mut small).unwrap();
    assert_eq!(small.n, 255);
}

#[test]
fn wide_ints_must_fit_the_leaf() {
    assert!(encode_full(&Huge { n: i64::min_value() as i128 }).is_ok());

    let err = encode_full(&Huge {
        n: i128::from(i64::max_value()) + 1,
    })
    .unwrap_err();
    match err.kind() {
        ErrorKind::UnsupportedType(_) => (),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn leaf_kind_mismatch() {
    // a string leaf where a bool is expected
    #[derive(TinySerDe, Debug, Default)]
    pub struct Flag {
        #[tiny = "on"]
        pub on: bool,
    }

    let enc = encode_full(&Doc {
        title: "yes".into(),
        body: vec![],
    })
    .unwrap();
    let err = decode_full(enc, &mut Flag::default()).unwrap_err();
    match err.kind() {
        ErrorKind::InvalidLeaf(msg) => assert_eq!(msg, "bool payload must be 1 bytes, found 3"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn top_level_kinds() {
    let mut m: HashMap<String, i64> = HashMap::new();
    m.insert("a".into(), 1);
    assert!(encode_full(&m).is_ok());
    assert!(encode_full(&vec![1u8]).is_ok());

    for err in &[
        encode_full(&1i64).unwrap_err(),
        encode_full(&true).unwrap_err(),
        encode_full(&String::from("s")).unwrap_err(),
    ] {
        match err.kind() {
            ErrorKind::Shape { .. } => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    let mut target = m.clone();
    let err = decode_full(encode_full(&m).unwrap(), &mut target).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::Shape {
            expected: "a struct",
            found: Kind::Mapping,
        }
    );
}
