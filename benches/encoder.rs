#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use tinyser::prelude::*;
use tinyser_strategy::*;

const N_CONTACTS: usize = 1000;

fn contacts() -> Vec<Contact> { (0..N_CONTACTS).map(|_| contact()).collect() }

fn bench_contact(c: &mut Criterion) {
    let a = contact();
    let enc_len = encode_full(&a).unwrap().len();
    c.bench_function(
        &format!("Encoding a contact, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&a))),
    );
}

fn bench_contacts(c: &mut Criterion) {
    let v = contacts();
    let enc_len = encode_full(&v).unwrap().len();
    c.bench_function(
        &format!(
            "Encoding {} contacts, output size of {} bytes",
            N_CONTACTS, enc_len
        ),
        move |b| b.iter(|| encode_full(black_box(&v))),
    );
}

fn bench_testie(c: &mut Criterion) {
    let t = testie();
    let enc_len = encode_full(&t).unwrap().len();
    c.bench_function(
        &format!("Encoding a nested fixture, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&t))),
    );
}

fn bench_testie_compressed(c: &mut Criterion) {
    let t = testie();
    let mut codec = Codec::new();
    codec.set_compress(true);
    c.bench_function("Encoding a nested fixture with compression", move |b| {
        b.iter(|| codec.encode(black_box(&t)))
    });
}

criterion_group!(
    benches,
    bench_contact,
    bench_contacts,
    bench_testie,
    bench_testie_compressed
);
criterion_main!(benches);
