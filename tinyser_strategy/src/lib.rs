//! Fixture shapes and proptest strategies for exercising the codec.

use bytes::Bytes;
use num_complex::Complex;
use proptest::{collection::hash_map, collection::vec, num::f64 as pf64, prelude::*};
use std::collections::HashMap;
use tinyser::TinySerDe;

/// A struct with a field of every common leaf and container combination.
#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct AllStruct {
    #[tiny = "boolfield"]
    pub bool_field: bool,
    #[tiny = "intfield"]
    pub int_field: i64,
    #[tiny = "floatfield"]
    pub float_field: f64,
    #[tiny = "stringfield"]
    pub string_field: String,
    #[tiny = "listbool"]
    pub list_bool: Vec<bool>,
    #[tiny = "listint"]
    pub list_int: Vec<i64>,
    #[tiny = "listfloat"]
    pub list_float: Vec<f64>,
    #[tiny = "liststring"]
    pub list_string: Vec<String>,
    #[tiny = "mapbool"]
    pub map_bool: HashMap<String, bool>,
    #[tiny = "mapint"]
    pub map_int: HashMap<String, i64>,
    #[tiny = "mapfloat"]
    pub map_float: HashMap<String, f64>,
    #[tiny = "mapstring"]
    pub map_string: HashMap<String, String>,
    #[tiny = "maplistbool"]
    pub map_list_bool: HashMap<String, Vec<bool>>,
    #[tiny = "maplistint"]
    pub map_list_int: HashMap<String, Vec<i64>>,
    #[tiny = "maplistfloat"]
    pub map_list_float: HashMap<String, Vec<f64>>,
    #[tiny = "mapliststring"]
    pub map_list_string: HashMap<String, Vec<String>>,
    #[tiny = "listmapbool"]
    pub list_map_bool: Vec<HashMap<i64, bool>>,
    #[tiny = "listmapint"]
    pub list_map_int: Vec<HashMap<i64, i64>>,
    #[tiny = "listmapfloat"]
    pub list_map_float: Vec<HashMap<i64, f64>>,
    #[tiny = "listmapstring"]
    pub list_map_string: Vec<HashMap<i64, String>>,
}

/// Nested sequences inside a struct field.
#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct Structie {
    #[tiny = "intlist"]
    pub int_list: Vec<i64>,
    #[tiny = "embeddedintlist"]
    pub embedded_int_list: Vec<Vec<i64>>,
    #[tiny = "embeddedstrlist"]
    pub embedded_str_list: Vec<Vec<String>>,
    #[tiny = "doubleembedded"]
    pub double_embedded: Vec<Vec<Vec<i64>>>,
}

/// The top-level fixture: nested structs, maps of lists, and a sequence of
/// mappings of boxed structs.
#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct Testie {
    #[tiny = "intlist"]
    pub int_list: Vec<i64>,
    #[tiny = "stringlist"]
    pub string_list: Vec<String>,
    #[tiny = "structie"]
    pub structie: Structie,
    #[tiny = "testmap"]
    pub test_map: HashMap<String, String>,
    #[tiny = "testmapoflists"]
    pub test_map_of_lists: HashMap<String, Vec<String>>,
    #[tiny = "mapembeddedwithlists"]
    pub map_embedded_with_lists: HashMap<String, Vec<Vec<Vec<i64>>>>,
    #[tiny = "all"]
    pub all: Box<AllStruct>,
    #[tiny = "listmapstruct"]
    pub list_map_struct: Vec<HashMap<i64, Box<AllStruct>>>,
}

/// The flat record used by the benchmarks.
#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct Contact {
    #[tiny = "name"]
    pub name: String,
    #[tiny = "birthday"]
    pub birthday: i64,
    #[tiny = "phone"]
    pub phone: String,
    #[tiny = "siblings"]
    pub siblings: isize,
    #[tiny = "spouse"]
    pub spouse: bool,
    #[tiny = "money"]
    pub money: f64,
}

/// Leaves of the less common kinds.
#[derive(TinySerDe, Clone, Debug, Default, PartialEq)]
pub struct Exotic {
    #[tiny = "small"]
    pub small: i8,
    #[tiny = "word"]
    pub word: u16,
    #[tiny = "size"]
    pub size: usize,
    #[tiny = "letter"]
    pub letter: char,
    #[tiny = "single"]
    pub single: f32,
    #[tiny = "wave"]
    pub wave: Complex<f64>,
    #[tiny = "blob"]
    pub blob: Bytes,
}

/// A sample [`Contact`].
pub fn contact() -> Contact {
    Contact {
        name: "John Doe".into(),
        birthday: 631_152_000,
        phone: "123456789".into(),
        siblings: 2,
        spouse: true,
        money: 123.45,
    }
}

fn greeting<T: Clone>(hello: T, world: T) -> HashMap<String, T> {
    let mut m = HashMap::new();
    m.insert("Hello".to_string(), hello);
    m.insert("World".to_string(), world);
    m
}

fn indexed<T>(entries: Vec<(i64, T)>) -> HashMap<i64, T> { entries.into_iter().collect() }

fn strings(ss: &[&str]) -> Vec<String> { ss.iter().map(|s| s.to_string()).collect() }

/// A fully populated [`AllStruct`].
pub fn all_struct() -> AllStruct {
    AllStruct {
        bool_field: true,
        int_field: 123,
        float_field: 123.456,
        string_field: "Hello World".into(),
        list_bool: vec![true, false, true, false],
        list_int: vec![1, 2, 3, 4],
        list_float: vec![1.2, 3.4, 5.6, 7.8],
        list_string: strings(&["Hello", "World"]),
        map_bool: greeting(true, false),
        map_int: greeting(1, 2),
        map_float: greeting(1.2, 3.4),
        map_string: {
            let mut m = HashMap::new();
            m.insert("Hello".to_string(), "World".to_string());
            m.insert("Foo".to_string(), "Bar".to_string());
            m
        },
        map_list_bool: greeting(vec![true, false], vec![false, true]),
        map_list_int: greeting(vec![1, 2], vec![3, 4]),
        map_list_float: greeting(vec![1.2, 3.4], vec![5.6, 7.8]),
        map_list_string: greeting(strings(&["Hello", "World"]), strings(&["Foo", "Bar"])),
        list_map_bool: vec![
            indexed(vec![(1, true), (2, false)]),
            indexed(vec![(3, true), (4, false)]),
        ],
        list_map_int: vec![indexed(vec![(1, 1), (2, 2)]), indexed(vec![(3, 3), (4, 4)])],
        list_map_float: vec![
            indexed(vec![(1, 1.2), (2, 3.4)]),
            indexed(vec![(3, 5.6), (4, 7.8)]),
        ],
        list_map_string: vec![
            indexed(vec![(1, "Hello".to_string()), (2, "World".to_string())]),
            indexed(vec![(3, "Foo".to_string()), (4, "Bar".to_string())]),
        ],
    }
}

/// A fully populated [`Testie`].
pub fn testie() -> Testie {
    let basic_int_list: Vec<i64> = (1..=10).collect();
    let basic_embedded = vec![basic_int_list.clone(); 3];
    let basic_double_embedded = vec![basic_embedded.clone(); 3];
    let basic_string_list = strings(&["Hello", "World", "This", "Is", "A", "Test"]);
    let struct_map = indexed(vec![
        (1, Box::new(all_struct())),
        (2, Box::new(all_struct())),
    ]);

    Testie {
        int_list: vec![1, 2, 3, 4],
        string_list: basic_string_list.clone(),
        structie: Structie {
            int_list: basic_int_list,
            embedded_int_list: basic_embedded.clone(),
            embedded_str_list: vec![basic_string_list.clone(); 2],
            double_embedded: vec![basic_embedded; 2],
        },
        test_map: {
            let mut m = HashMap::new();
            m.insert("Hello".to_string(), "World".to_string());
            m.insert("Foo".to_string(), "Bar".to_string());
            m
        },
        test_map_of_lists: {
            let mut m = HashMap::new();
            m.insert("Hello".to_string(), basic_string_list.clone());
            m.insert("Foo".to_string(), basic_string_list);
            m
        },
        map_embedded_with_lists: {
            let mut m = HashMap::new();
            m.insert("Hello".to_string(), basic_double_embedded.clone());
            m.insert("Foo".to_string(), basic_double_embedded);
            m
        },
        all: Box::new(all_struct()),
        list_map_struct: vec![struct_map.clone(), struct_map],
    }
}

/// arbitrary short text for use with proptest
pub fn arb_text() -> impl Strategy<Value = String> { ".{0,24}" }

/// arbitrary bytestrings for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> { vec(any::<u8>(), 0..64).prop_map(Bytes::from) }

/// arbitrary doubles, excluding NaN so that equality holds after a round trip
pub fn arb_double() -> impl Strategy<Value = f64> {
    pf64::POSITIVE | pf64::NEGATIVE | pf64::NORMAL | pf64::SUBNORMAL | pf64::ZERO | pf64::INFINITE
}

/// arbitrary singles, excluding NaN
pub fn arb_single() -> impl Strategy<Value = f32> {
    use proptest::num::f32 as pf32;
    pf32::POSITIVE | pf32::NEGATIVE | pf32::NORMAL | pf32::SUBNORMAL | pf32::ZERO | pf32::INFINITE
}

fn small_vec<S: Strategy>(s: S) -> impl Strategy<Value = Vec<S::Value>> { vec(s, 0..5) }

fn text_map<S: Strategy>(s: S) -> impl Strategy<Value = HashMap<String, S::Value>> {
    hash_map(arb_text(), s, 0..5)
}

fn int_map<S: Strategy>(s: S) -> impl Strategy<Value = HashMap<i64, S::Value>> {
    hash_map(any::<i64>(), s, 0..5)
}

prop_compose! {
    /// arbitrary [`AllStruct`] for use with proptest
    pub fn arb_all_struct()(
        scalars in (
            any::<bool>(),
            any::<i64>(),
            arb_double(),
            arb_text(),
            small_vec(any::<bool>()),
            small_vec(any::<i64>()),
            small_vec(arb_double()),
            small_vec(arb_text()),
        ),
        maps in (
            text_map(any::<bool>()),
            text_map(any::<i64>()),
            text_map(arb_double()),
            text_map(arb_text()),
            text_map(small_vec(any::<bool>())),
            text_map(small_vec(any::<i64>())),
            text_map(small_vec(arb_double())),
            text_map(small_vec(arb_text())),
        ),
        lists in (
            small_vec(int_map(any::<bool>())),
            small_vec(int_map(any::<i64>())),
            small_vec(int_map(arb_double())),
            small_vec(int_map(arb_text())),
        ),
    ) -> AllStruct {
        let (bool_field, int_field, float_field, string_field, list_bool, list_int, list_float, list_string) = scalars;
        let (map_bool, map_int, map_float, map_string, map_list_bool, map_list_int, map_list_float, map_list_string) = maps;
        let (list_map_bool, list_map_int, list_map_float, list_map_string) = lists;
        AllStruct {
            bool_field,
            int_field,
            float_field,
            string_field,
            list_bool,
            list_int,
            list_float,
            list_string,
            map_bool,
            map_int,
            map_float,
            map_string,
            map_list_bool,
            map_list_int,
            map_list_float,
            map_list_string,
            list_map_bool,
            list_map_int,
            list_map_float,
            list_map_string,
        }
    }
}

prop_compose! {
    /// arbitrary [`Structie`] for use with proptest
    pub fn arb_structie()(
        int_list in small_vec(any::<i64>()),
        embedded_int_list in small_vec(small_vec(any::<i64>())),
        embedded_str_list in small_vec(small_vec(arb_text())),
        double_embedded in small_vec(small_vec(small_vec(any::<i64>()))),
    ) -> Structie {
        Structie { int_list, embedded_int_list, embedded_str_list, double_embedded }
    }
}

prop_compose! {
    /// arbitrary [`Testie`] for use with proptest
    pub fn arb_testie()(
        int_list in small_vec(any::<i64>()),
        string_list in small_vec(arb_text()),
        structie in arb_structie(),
        test_map in text_map(arb_text()),
        test_map_of_lists in text_map(small_vec(arb_text())),
        map_embedded_with_lists in text_map(small_vec(small_vec(small_vec(any::<i64>())))),
        all in arb_all_struct(),
        list_map_struct in vec(int_map(arb_all_struct().prop_map(Box::new)), 0..2),
    ) -> Testie {
        Testie {
            int_list,
            string_list,
            structie,
            test_map,
            test_map_of_lists,
            map_embedded_with_lists,
            all: Box::new(all),
            list_map_struct,
        }
    }
}

prop_compose! {
    /// arbitrary [`Exotic`] for use with proptest
    pub fn arb_exotic()(
        small in any::<i8>(),
        word in any::<u16>(),
        size in any::<usize>(),
        letter in any::<char>(),
        single in arb_single(),
        wave in (arb_double(), arb_double()).prop_map(|(re, im)| Complex::new(re, im)),
        blob in arb_bytes(),
    ) -> Exotic {
        Exotic { small, word, size, letter, single, wave, blob }
    }
}
