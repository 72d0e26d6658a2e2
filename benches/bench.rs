// Criterion benchmarks for Venue Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use venue_algo::core::{Recommender, TfIdfIndex};
use venue_algo::models::{EventRequest, FeedbackRecord, HistoricalEvent, Venue};

const DESCRIPTIONS: [&str; 6] = [
    "annual tech conference with keynote talks and workshops",
    "outdoor summer wedding reception with live band",
    "corporate holiday party with catering and music",
    "startup product launch with press and demos",
    "charity gala dinner and silent auction",
    "developer hackathon weekend with mentoring sessions",
];

fn create_history(count: usize) -> Vec<HistoricalEvent> {
    (0..count)
        .map(|i| HistoricalEvent {
            event_id: format!("h{}", i),
            description: DESCRIPTIONS[i % DESCRIPTIONS.len()].to_string(),
            venue_id: format!("v{}", i % 20),
            rating: 3.0 + (i % 3) as f64,
        })
        .collect()
}

fn create_venues(count: usize) -> Vec<Venue> {
    (0..count)
        .map(|i| Venue {
            venue_id: format!("v{}", i),
            name: format!("Venue {}", i),
            max_capacity: 50 + (i as u32 % 10) * 50,
            amenities: vec!["wifi".to_string(), "parking".to_string()],
            region: if i % 2 == 0 { "East" } else { "West" }.to_string(),
            estimated_cost: 2000.0 + (i as f64 % 8.0) * 1000.0,
            features: vec!["stage".to_string()],
            description: String::new(),
        })
        .collect()
}

fn create_event() -> EventRequest {
    EventRequest {
        event_id: "ev_bench".to_string(),
        attendee_count: 120,
        required_amenities: vec!["wifi".to_string(), "parking".to_string()],
        preferred_region: "East".to_string(),
        budget: 5000.0,
        special_requirements: vec!["stage".to_string()],
        description: "annual tech conference with workshops".to_string(),
    }
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for corpus_size in [10, 100, 1000].iter() {
        let history = create_history(*corpus_size);
        group.bench_with_input(
            BenchmarkId::new("build", corpus_size),
            corpus_size,
            |b, _| {
                b.iter(|| TfIdfIndex::build(black_box(history.clone())));
            },
        );
    }

    group.finish();
}

fn bench_retrieval(c: &mut Criterion) {
    let index = TfIdfIndex::build(create_history(1000));

    c.bench_function("retrieve_top5_from_1000", |b| {
        b.iter(|| {
            index.retrieve(
                black_box("annual tech conference with workshops"),
                black_box(5),
            )
        });
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_defaults();
    let index = TfIdfIndex::build(create_history(500));
    let event = create_event();
    let feedback: Vec<FeedbackRecord> = Vec::new();

    let mut group = c.benchmark_group("recommend");

    for venue_count in [10, 50, 100, 500].iter() {
        let venues = create_venues(*venue_count);

        group.bench_with_input(
            BenchmarkId::new("rank", venue_count),
            venue_count,
            |b, _| {
                b.iter(|| {
                    recommender.recommend(
                        black_box(&event),
                        black_box(&venues),
                        black_box(&feedback),
                        black_box(&index),
                        black_box(3),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_retrieval, bench_recommend);
criterion_main!(benches);
