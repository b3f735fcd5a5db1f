use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use utfx::{Converter, Mode};

const CORPUS: &str = "The quick brown fox jumps over the lazy dog. \
    Größenwahn café naïve. Съешь же ещё этих мягких французских булок. \
    いろはにほへと ちりぬるを 😀🚀🦀 ";

fn corpus() -> Vec<u8> {
    CORPUS.repeat(256).into_bytes()
}

fn convert_all(converter: &mut Converter, src: &[u8], dst: &mut [u8]) -> usize {
    let mut offset = 0;
    let mut written = 0;
    while offset < src.len() || converter.has_pending() {
        match converter.convert(&src[offset..], dst) {
            Ok(progress) => {
                offset += progress.consumed;
                written += progress.written;
            }
            Err(_) => break,
        }
    }
    written
}

fn from_utf8(c: &mut Criterion) {
    let src = corpus();
    let mut group = c.benchmark_group("from utf-8");
    group.throughput(Throughput::Bytes(src.len() as u64));
    for mode in Mode::CODECS {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &src, |b, src| {
            let mut dst = vec![0; 4096];
            b.iter(|| {
                let mut converter = Converter::with_modes(Mode::Utf8, mode);
                convert_all(&mut converter, src, &mut dst)
            })
        });
    }
    group.finish();
}

fn unit_at_a_time(c: &mut Criterion) {
    let src = corpus();
    c.bench_with_input(
        BenchmarkId::new("write/read", "utf-8 to utf-16le"),
        &src,
        |b, src| {
            b.iter(|| {
                let mut converter = Converter::with_modes(Mode::Utf8, Mode::Utf16Le);
                let mut unit = [0; 4];
                let mut offset = 0;
                let mut written = 0;
                while offset < src.len() {
                    let consumed = converter.write(&src[offset..]);
                    if consumed == 0 {
                        break;
                    }
                    offset += consumed;
                    written += converter.read(&mut unit);
                }
                written
            })
        },
    );
}

criterion_group!(benches, from_utf8, unit_at_a_time);

criterion_main!(benches);
