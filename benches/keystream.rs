//! Keystream throughput across the three strengths.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use zipaes::AesEncryptor;

fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");

    for (strength, name) in [(1u8, "aes128"), (2, "aes192"), (3, "aes256")] {
        let mut cipher = AesEncryptor::new(b"swordfish", strength);
        cipher.reset().expect("reset");
        let mut buf = vec![0u8; 64 * 1024];

        group.throughput(Throughput::Bytes(buf.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| cipher.encrypt(&mut buf).expect("encrypt"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encrypt);
criterion_main!(benches);
