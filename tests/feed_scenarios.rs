//! End-to-end scenarios driving a `Feed` through its event queue.

use crossbeam_channel::unbounded;
use feedwheel::{
    Applied, Feed, FetchError, FetchState, Item, ItemCache, Lifecycle, LiveChannel, LiveEvent,
    LiveState, Merged, Page, Paginator, PaginatorConfig, Preprocess, ReadinessGate, Sentinel,
    SentinelBounds, Step,
};
use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Status {
    id: String,
    text: String,
}

impl Status {
    fn new(id: u32) -> Self {
        Self {
            id: format!("s{id}"),
            text: format!("status {id}"),
        }
    }
}

impl Item for Status {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// A timeline of `total` statuses served `per_page` at a time.
fn timeline(total: u32, per_page: u32) -> impl FnMut() -> Result<Page<Status>, FetchError> + Send {
    let mut cursor = 0;
    move || {
        if cursor >= total {
            return Ok(Page::end());
        }
        let end = (cursor + per_page).min(total);
        let items = (cursor..end).map(Status::new).collect();
        cursor = end;
        Ok(Page::more(items))
    }
}

fn config() -> PaginatorConfig {
    PaginatorConfig::default()
        .with_geometry_interval(Duration::from_millis(20))
        .with_restore_delay(Duration::from_millis(30))
}

/// Step until `done` holds, or panic after two seconds.
fn step_until<P: Preprocess<Status>>(
    feed: &mut Feed<Status, P>,
    mut done: impl FnMut(&Feed<Status, P>, Step) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        let step = feed.step(Duration::from_millis(20));
        if done(feed, step) {
            return;
        }
    }
    panic!("condition not reached");
}

fn assert_unique(items: &[Status]) {
    let mut seen = HashSet::new();
    for item in items {
        assert!(seen.insert(item.id.clone()), "duplicate {}", item.id);
    }
}

#[test]
fn pure_pagination_loads_until_done() {
    let _ = env_logger::try_init();
    let sentinel = Sentinel::new();
    let paginator = Paginator::builder(timeline(45, 15), ItemCache::new())
        .config(config())
        .sentinel(sentinel.clone())
        .build();
    let mut feed = Feed::new(paginator, LiveChannel::never());
    assert_eq!(feed.live_state(), LiveState::Closed);

    // Only the periodic re-measure notices the sentinel
    sentinel.place(SentinelBounds::new(0.0, 800.0));
    step_until(&mut feed, |feed, _| {
        feed.paginator().state() == FetchState::Done
    });

    let paginator = feed.paginator();
    assert_eq!(paginator.items().len(), 45);
    assert!(paginator.lookahead().is_empty());
    assert_eq!(paginator.items()[0], Status::new(0));
    assert_eq!(paginator.items()[44], Status::new(44));
}

#[test]
fn far_sentinel_holds_back_fetching() {
    let sentinel = Sentinel::new();
    sentinel.place(SentinelBounds::new(10_000.0, 800.0));
    let paginator = Paginator::builder(timeline(45, 15), ItemCache::new())
        .config(config())
        .sentinel(sentinel.clone())
        .build();
    let mut feed = Feed::new(paginator, LiveChannel::never());

    feed.run_until(Instant::now() + Duration::from_millis(100));
    assert!(feed.paginator().items().is_empty());
    assert_eq!(feed.paginator().state(), FetchState::Idle);

    // Scrolled close: exactly one page, then far again
    sentinel.place(SentinelBounds::new(900.0, 800.0));
    step_until(&mut feed, |_, step| matches!(step, Step::Fetched(_)));
    sentinel.place(SentinelBounds::new(10_000.0, 800.0));
    feed.run_until(Instant::now() + Duration::from_millis(100));

    assert!(feed.paginator().items().len() + feed.paginator().lookahead().len() <= 30);
    assert_ne!(feed.paginator().state(), FetchState::Done);
}

#[test]
fn live_channel_bound_after_creation() {
    let _ = env_logger::try_init();
    let paginator = Paginator::builder(timeline(5, 5), ItemCache::new())
        .config(config())
        .build();
    let (live, connector) = LiveChannel::pending();
    let mut feed = Feed::new(paginator, live);
    assert_eq!(feed.live_state(), LiveState::Pending);

    feed.paginator_mut().load_next();
    step_until(&mut feed, |_, step| matches!(step, Step::Fetched(_)));
    assert_eq!(feed.paginator().items().len(), 5);

    let (event_tx, event_rx) = unbounded();
    assert!(connector.connect(event_rx));
    step_until(&mut feed, |_, step| step == Step::LiveConnected);
    assert_eq!(feed.live_state(), LiveState::Connected);

    event_tx.send(LiveEvent::update(Status::new(100))).unwrap();
    event_tx.send(LiveEvent::update(Status::new(101))).unwrap();
    event_tx.send(LiveEvent::Deleted("s2".to_string())).unwrap();
    let mut merged = Vec::new();
    step_until(&mut feed, |_, step| {
        if let Step::Live(m) = step {
            merged.push(m);
        }
        merged.len() == 3
    });
    assert_eq!(merged[2], Merged::Deleted { in_view: true });

    let pending: Vec<_> = feed.paginator().pending().iter().map(|s| s.id.clone()).collect();
    assert_eq!(pending, vec!["s101", "s100"]);

    assert_eq!(feed.paginator_mut().update(), 2);
    let ids: Vec<_> = feed.paginator().items().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s101", "s100", "s0", "s1", "s3", "s4"]);
    assert_eq!(feed.paginator().cache().get(&"s2".to_string()), None);
    assert!(feed.paginator().cache().get(&"s100".to_string()).is_some());

    // Transport hangs up: the feed carries on without live events
    drop(event_tx);
    step_until(&mut feed, |_, step| step == Step::LiveClosed);
    assert_eq!(feed.live_state(), LiveState::Closed);
}

#[test]
fn dropped_connector_means_pure_pagination() {
    let paginator = Paginator::builder(timeline(3, 3), ItemCache::new())
        .config(config())
        .build();
    let (live, connector) = LiveChannel::pending();
    let mut feed = Feed::new(paginator, live);

    drop(connector);
    step_until(&mut feed, |_, step| step == Step::LiveClosed);

    feed.paginator_mut().load_next();
    step_until(&mut feed, |_, step| matches!(step, Step::Fetched(_)));
    assert_eq!(feed.paginator().items().len(), 3);
}

#[test]
fn readiness_from_another_thread_starts_loading() {
    let gate = ReadinessGate::new();
    let paginator = Paginator::builder(timeline(4, 4), ItemCache::new())
        .config(config())
        .gate(gate.clone())
        .build();
    let mut feed = Feed::new(paginator, LiveChannel::never());
    assert_eq!(feed.paginator().state(), FetchState::Loading);

    feed.run_until(Instant::now() + Duration::from_millis(50));
    assert!(feed.paginator().items().is_empty());

    let opener = thread::spawn(move || gate.mark_ready());
    step_until(&mut feed, |_, step| step == Step::Ready);
    opener.join().unwrap();

    step_until(&mut feed, |_, step| matches!(step, Step::Fetched(_)));
    assert_eq!(feed.paginator().items().len(), 4);
    assert_eq!(feed.paginator().state(), FetchState::Idle);
}

#[test]
fn suspension_pauses_and_resume_restores() {
    let restores = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = restores.clone();
    let sentinel = Sentinel::new();
    let paginator = Paginator::builder(timeline(100, 20), ItemCache::new())
        .config(config())
        .sentinel(sentinel.clone())
        .restorer(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        })
        .build();
    let mut feed = Feed::new(paginator, LiveChannel::never());
    let lifecycle = feed.lifecycle();

    lifecycle.send(Lifecycle::Suspended).unwrap();
    step_until(&mut feed, |_, step| step == Step::Lifecycle(Lifecycle::Suspended));

    sentinel.place(SentinelBounds::new(0.0, 800.0));
    feed.run_until(Instant::now() + Duration::from_millis(100));
    assert!(feed.paginator().items().is_empty());
    assert_eq!(restores.load(std::sync::atomic::Ordering::SeqCst), 0);

    sentinel.place(SentinelBounds::new(10_000.0, 800.0));
    lifecycle.send(Lifecycle::Resumed).unwrap();
    step_until(&mut feed, |_, step| step == Step::Restored);
    assert_eq!(restores.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn destroyed_feed_ignores_late_work() {
    let cache = ItemCache::new();
    let paginator = Paginator::builder(timeline(10, 10), cache.clone())
        .config(config())
        .build();
    let (event_tx, event_rx) = unbounded();
    let mut feed = Feed::new(paginator, LiveChannel::ready(event_rx));

    feed.paginator_mut().load_next();
    step_until(&mut feed, |_, step| step == Step::Fetched(Applied::Page { shown: 0, held: 10 }));

    feed.lifecycle().send(Lifecycle::Destroyed).unwrap();
    step_until(&mut feed, |feed, _| feed.is_destroyed());

    event_tx.send(LiveEvent::update(Status::new(99))).ok();
    assert_eq!(feed.step(Duration::from_millis(20)), Step::Idle);
    assert!(feed.paginator().pending().is_empty());
    assert_eq!(feed.paginator().lookahead().len(), 10);

    // A recreated feed shares the cache of its predecessor
    let paginator = Paginator::builder(timeline(0, 10), cache.clone())
        .config(config())
        .build();
    let recreated = Feed::new(paginator, LiveChannel::never());
    assert!(recreated.paginator().cache().get(&"s3".to_string()).is_some());
}

#[test]
fn dedup_holds_with_overlapping_pages_and_live_traffic() {
    // Each page repeats the tail of the previous one
    let mut cursor = 0u32;
    let source = move || -> Result<Page<Status>, FetchError> {
        if cursor >= 60 {
            return Ok(Page::end());
        }
        let start = cursor.saturating_sub(5);
        cursor += 15;
        Ok(Page::more((start..cursor).map(Status::new).collect()))
    };
    let paginator = Paginator::builder(source, ItemCache::new())
        .config(config().with_buffer(4))
        .build();
    let (event_tx, event_rx) = unbounded();
    let mut feed = Feed::new(paginator, LiveChannel::ready(event_rx));

    for round in 0..5u32 {
        event_tx.send(LiveEvent::update(Status::new(round * 7))).unwrap();
        event_tx
            .send(LiveEvent::Updated(Status {
                id: format!("s{round}"),
                text: "edited".to_string(),
            }))
            .unwrap();
        feed.paginator_mut().load_next();
        step_until(&mut feed, |_, step| matches!(step, Step::Fetched(_)));
        feed.run_until(Instant::now() + Duration::from_millis(20));
        feed.paginator_mut().update();
        assert_unique(feed.paginator().items());
    }
    assert_eq!(feed.paginator().state(), FetchState::Done);
    let total = feed.paginator().items().len();
    assert_eq!(total, 60);
}
