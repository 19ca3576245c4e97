//! Benchmarks for the serialized write path.
//!
//! Every log call takes the lock and issues six append syscalls, so the
//! numbers here are dominated by the OS write cost. Cases:
//!
//! - **short**: a typical trace line.
//! - **capacity**: a message exactly at the default buffer bound.
//! - **oversized**: a message that gets truncated.
//! - **contended**: four threads sharing one logger.

use std::thread;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use exelog::writer::MESSAGE_CAPACITY;
use exelog::{LogConfig, Logger, PanicOnFatal, SourceLocation};

fn open_logger(dir: &tempfile::TempDir) -> Logger {
    let logger = Logger::with_fatal_handler(LogConfig::default(), PanicOnFatal);
    logger
        .try_open(&dir.path().join("bench.exe"))
        .expect("open bench log");
    logger
}

fn bench_single_thread(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = open_logger(&dir);
    let location = SourceLocation::new("bench.rs", "1");

    let cases = [
        ("short", 24),
        ("capacity", MESSAGE_CAPACITY),
        ("oversized", MESSAGE_CAPACITY * 4),
    ];

    let mut group = c.benchmark_group("log");
    for (name, len) in cases {
        let message = "m".repeat(len);
        group.bench_with_input(BenchmarkId::from_parameter(name), &message, |b, message| {
            b.iter(|| logger.log(location, format_args!("{}", black_box(message))));
        });
    }
    group.finish();
    logger.close();
}

fn bench_contended(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = open_logger(&dir);

    c.bench_function("log/contended_4x100", |b| {
        b.iter(|| {
            thread::scope(|s| {
                for t in 0..4 {
                    let logger = &logger;
                    s.spawn(move || {
                        for i in 0..100 {
                            logger.log(
                                SourceLocation::new("bench.rs", "2"),
                                format_args!("thread {t} step {i}"),
                            );
                        }
                    });
                }
            });
        });
    });
    logger.close();
}

criterion_group!(benches, bench_single_thread, bench_contended);
criterion_main!(benches);
