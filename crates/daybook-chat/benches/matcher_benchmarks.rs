//! Benchmarks for the canned-reply fast path.
//!
//! Every message pays for a fuzzy lookup before any external call, so the
//! lookup over the builtin trigger table must stay well under a millisecond,
//! including for long messages that match nothing.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use daybook_chat::{find_match, normalize, FuzzyMatcher, TriggerTable};
use daybook_core::config::ChatConfig;

/// Messages a user might type, from greetings with typos to long requests.
fn sample_messages() -> Vec<String> {
    let base = [
        "hello",
        "Helo",
        "good mornin",
        "thank you!",
        "remind me to renew the car insurance before the end of the month",
        "I spent $42.50 on groceries at the farmers market yesterday afternoon",
        "what do you think I should prioritise this week given everything on my plate?",
    ];
    (0..700).map(|i| base[i % base.len()].to_string()).collect()
}

fn bench_find_match(c: &mut Criterion) {
    let table = TriggerTable::builtin();
    let messages: Vec<String> = sample_messages().iter().map(|m| normalize(m)).collect();

    let mut group = c.benchmark_group("find_match");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("exact_hit", |b| {
        b.iter(|| find_match(black_box("hello"), &table, 2));
    });

    group.bench_function("typo_hit", |b| {
        b.iter(|| find_match(black_box("good mornin"), &table, 2));
    });

    group.bench_function("mixed_messages", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let msg = &messages[idx % messages.len()];
            idx += 1;
            find_match(msg, &table, 2)
        });
    });

    group.finish();
}

fn bench_fuzzy_matcher(c: &mut Criterion) {
    let matcher = FuzzyMatcher::new(Arc::new(TriggerTable::builtin()), &ChatConfig::default());
    let messages: Vec<String> = sample_messages().iter().map(|m| normalize(m)).collect();

    let mut group = c.benchmark_group("fuzzy_matcher");
    group.sample_size(200);

    group.bench_function("lookup_batch_100", |b| {
        b.iter(|| {
            messages[..100]
                .iter()
                .filter(|m| matcher.lookup(m).is_match())
                .count()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_find_match, bench_fuzzy_matcher);
criterion_main!(benches);
