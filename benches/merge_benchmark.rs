//! Merge benchmark: live event splicing and page folding.
//!
//! Target: < 50µs for a live edit against a 2000-item feed

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feedwheel::engine::Buffers;
use feedwheel::live::LiveMerger;
use feedwheel::{
    FeedKind, FetchError, FetchState, Identity, Item, ItemCache, LiveEvent, Page, Paginator,
    PaginatorConfig,
};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    body: String,
}

impl Item for Entry {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

fn entry(id: u64) -> Entry {
    Entry {
        id,
        body: format!("entry {id}"),
    }
}

/// Paginate `total` entries to exhaustion.
fn paginate(total: u64, per_page: u64) -> usize {
    let mut cursor = 0;
    let source = move || -> Result<Page<Entry>, FetchError> {
        if cursor >= total {
            return Ok(Page::end());
        }
        let end = (cursor + per_page).min(total);
        let items = (cursor..end).map(entry).collect();
        cursor = end;
        Ok(Page::more(items))
    };
    let mut paginator = Paginator::builder(source, ItemCache::new())
        .config(PaginatorConfig::default())
        .build();
    while paginator.state() != FetchState::Done {
        paginator.load_next();
        paginator.wait_outcome(Duration::from_secs(5));
    }
    paginator.items().len()
}

fn fold_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate");
    for per_page in [20u64, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(per_page),
            &per_page,
            |b, &per_page| b.iter(|| paginate(black_box(2000), per_page)),
        );
    }
    group.finish();
}

fn live_edit_in_large_feed(c: &mut Criterion) {
    let merger = LiveMerger::new(FeedKind::Update, ItemCache::new());
    let mut buffers: Buffers<Entry, Entry> = Buffers::default();
    for id in 0..2000 {
        merger.apply(LiveEvent::update(entry(id)), &mut buffers, &Identity);
    }

    c.bench_function("live_edit_2000", |b| {
        b.iter(|| {
            let edited = Entry {
                id: 1000,
                body: "edited".to_string(),
            };
            merger.apply(black_box(LiveEvent::Updated(edited)), &mut buffers, &Identity)
        })
    });
}

fn live_burst(c: &mut Criterion) {
    c.bench_function("live_burst_500", |b| {
        b.iter(|| {
            let merger = LiveMerger::new(FeedKind::Update, ItemCache::new());
            let mut buffers: Buffers<Entry, Entry> = Buffers::default();
            for id in 0..500 {
                merger.apply(LiveEvent::update(entry(id % 400)), &mut buffers, &Identity);
            }
            buffers.pending().len()
        })
    });
}

criterion_group!(benches, fold_pages, live_edit_in_large_feed, live_burst);
criterion_main!(benches);
