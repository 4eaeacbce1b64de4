use tinyser::prelude::*;

#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct Person {
    #[tiny = "name"]
    pub name: String,
    #[tiny = "-"]
    pub password: String,
    #[tiny = ""]
    pub blank: i32,
    pub untagged: bool,
    #[tiny = "secret"]
    hidden: u8,
    #[tiny = "siblings"]
    pub siblings: i64,
    #[tiny = "omitempty"]
    pub nickname: String,
}

fn wire_names<T: Shape>() -> Vec<&'static str> {
    T::FIELDS
        .iter()
        .filter(|f| f.directive != Directive::Exclude)
        .map(|f| f.name)
        .collect()
}

#[test]
fn directive_table() {
    let table: Vec<(&str, Directive)> = Person::FIELDS
        .iter()
        .map(|f| (f.name, f.directive))
        .collect();
    assert_eq!(
        table,
        vec![
            ("name", Directive::Include),
            ("password", Directive::Exclude),
            ("blank", Directive::Exclude),
            ("untagged", Directive::Exclude),
            ("hidden", Directive::Exclude),
            ("siblings", Directive::Include),
            ("nickname", Directive::IncludeIfNonDefault),
        ]
    );
    assert_eq!(wire_names::<Person>(), vec!["name", "siblings", "nickname"]);
}

#[test]
fn excluded_fields_write_nothing() {
    let p = Person {
        name: "A".into(),
        password: "hunter2".into(),
        blank: 9,
        untagged: true,
        hidden: 7,
        siblings: 1,
        nickname: String::new(),
    };
    let enc = encode_full(&p).unwrap();
    assert_eq!(
        enc,
        vec![1, 0, b'A', 8, 0, 1, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn excluded_fields_keep_the_targets_values() {
    let p = Person {
        name: "A".into(),
        password: "ignored".into(),
        siblings: 3,
        ..Person::default()
    };
    let enc = encode_full(&p).unwrap();

    let mut target = Person {
        password: "kept".into(),
        blank: -4,
        untagged: true,
        hidden: 42,
        ..Person::default()
    };
    decode_full(enc, &mut target).unwrap();

    assert_eq!(target.name, "A");
    assert_eq!(target.siblings, 3);
    assert_eq!(target.password, "kept");
    assert_eq!(target.blank, -4);
    assert!(target.untagged);
    assert_eq!(target.hidden, 42);
}

#[test]
fn omitempty_written_when_set() {
    let p = Person {
        nickname: "Al".into(),
        ..Person::default()
    };
    let enc = encode_full(&p).unwrap();
    assert_eq!(&enc[enc.len() - 4..], &[2, 0, b'A', b'l']);

    let mut dec = Person::default();
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec.nickname, "Al");
}

#[test]
fn trailing_omitempty_absent_keeps_target() {
    let enc = encode_full(&Person::default()).unwrap();
    // name and siblings only
    assert_eq!(enc.len(), 2 + 10);

    let mut dec = Person {
        nickname: "stale".into(),
        ..Person::default()
    };
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec.nickname, "stale");
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Flags {
    #[tiny = "omitempty"]
    pub count: u32,
    #[tiny = "omitempty"]
    pub ratio: f64,
    #[tiny = "omitempty"]
    pub items: Vec<u8>,
    #[tiny = "omitempty"]
    pub person: Person,
}

#[test]
fn default_values_by_kind() {
    assert!(encode_full(&Flags::default()).unwrap().is_empty());

    // -0.0 differs from the default bit pattern
    let f = Flags {
        ratio: -0.0,
        ..Flags::default()
    };
    assert_eq!(encode_full(&f).unwrap().len(), 10);

    // a struct is default when every wire field is; excluded fields don't count
    let f = Flags {
        person: Person {
            password: "x".into(),
            ..Person::default()
        },
        ..Flags::default()
    };
    assert!(encode_full(&f).unwrap().is_empty());
}

#[test]
fn defaults_decode_into_a_fresh_target() {
    let enc = encode_full(&Flags::default()).unwrap();
    assert!(enc.is_empty());

    let mut dec = Flags::default();
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec, Flags::default());

    let enc = encode_full(&Person::default()).unwrap();
    let mut dec = Person::default();
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec, Person::default());
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Inner {
    #[tiny = "a"]
    pub a: i64,
    #[tiny = "omitempty"]
    pub nick: String,
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Outer {
    #[tiny = "inner"]
    pub inner: Inner,
    #[tiny = "tag"]
    pub tag: String,
}

#[test]
fn nested_omitempty_reads_the_following_field() {
    // a defaulted omitempty field writes nothing, so the decoder cannot tell
    // it apart from the bytes of whatever comes next
    let value = Outer {
        inner: Inner {
            a: 1,
            nick: String::new(),
        },
        tag: "x".into(),
    };
    let enc = encode_full(&value).unwrap();
    assert_eq!(enc.len(), 10 + 3);

    let mut dec = Outer::default();
    let err = decode_full(enc, &mut dec).unwrap_err();
    assert_eq!(dec.inner.nick, "x");
    assert_eq!(err.path_string(), ".tag");
    assert_eq!(
        err.kind(),
        &ErrorKind::Truncated {
            offset: 13,
            needed: 2,
            remaining: 0,
        }
    );

    // set, it round trips
    let value = Outer {
        inner: Inner {
            a: 1,
            nick: "n".into(),
        },
        tag: "x".into(),
    };
    let mut dec = Outer::default();
    decode_full(encode_full(&value).unwrap(), &mut dec).unwrap();
    assert_eq!(dec, value);
}

#[allow(dead_code)]
#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Hidden {
    #[tiny = "secret"]
    secret: u8,
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Holder {
    #[tiny = "items"]
    pub items: Vec<Hidden>,
}

#[test]
fn zero_width_elements_are_bounded_by_the_count_limit() {
    let mut dec = Holder::default();
    let err = decode_full(vec![0xffu8, 0xff, 0xff, 0xff], &mut dec).unwrap_err();
    assert_eq!(err.path_string(), ".items");
    match err.kind() {
        ErrorKind::CountLimit { count, .. } => assert_eq!(*count, 0xffff_ffff),
        other => panic!("unexpected error {:?}", other),
    }

    let mut dec = Holder::default();
    decode_full(vec![3u8, 0, 0, 0], &mut dec).unwrap();
    assert_eq!(dec.items.len(), 3);
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Pair(#[tiny = "0"] pub i16, #[tiny = "-"] pub String, #[tiny = "2"] pub bool);

#[test]
fn tuple_structs_use_positions() {
    assert_eq!(wire_names::<Pair>(), vec!["0", "2"]);

    let enc = encode_full(&Pair(-1, "skip".into(), true)).unwrap();
    assert_eq!(
        enc,
        vec![8, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 1, 0, 1]
    );

    let mut dec = Pair(0, "old".into(), false);
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec, Pair(-1, "old".into(), true));
}

#[derive(TinySerDe, Debug, Default, PartialEq)]
pub struct Tagged<T> {
    #[tiny = "value"]
    pub value: T,
    #[tiny = "-"]
    pub note: std::cell::Cell<u8>,
}

#[test]
fn generic_shapes() {
    let t = Tagged {
        value: vec![1u8],
        note: Default::default(),
    };
    let enc = encode_full(&t).unwrap();
    assert_eq!(enc, vec![1, 0, 0, 0, 8, 0, 1, 0, 0, 0, 0, 0, 0, 0]);

    let mut dec: Tagged<Vec<u8>> = Tagged::default();
    decode_full(enc, &mut dec).unwrap();
    assert_eq!(dec.value, vec![1]);
}
