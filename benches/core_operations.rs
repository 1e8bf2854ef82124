use brewlet::caveats::{DEFAULT_TEMPLATE, render};
use brewlet::checksum::{sha256_hex, verify};
use brewlet::manifest::Manifest;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    for size in [1024usize, 64 * 1024, 1024 * 1024] {
        let bytes = vec![b'#'; size];
        let digest = sha256_hex(&bytes);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| verify(black_box(bytes), black_box(&digest)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    c.bench_function("render default caveats", |b| {
        b.iter(|| render(black_box(DEFAULT_TEMPLATE), "installer-script", "my-installer"))
    });
}

fn bench_validate(c: &mut Criterion) {
    let manifest = Manifest {
        name: "installer-script".to_string(),
        source_url: "https://example.test/installer.sh".to_string(),
        expected_hash: sha256_hex(b"echo hi"),
        install_target_name: "my-installer".to_string(),
        ..Default::default()
    };

    c.bench_function("validate manifest", |b| {
        b.iter(|| black_box(&manifest).validate())
    });
}

criterion_group!(benches, bench_verify, bench_render, bench_validate);
criterion_main!(benches);
