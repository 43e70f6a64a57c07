//! Feed Demo: a simulated timeline with a late streaming connection.
//!
//! A slow page source serves 60 posts while a second thread connects the
//! live channel after a moment and pushes new posts, edits and deletions.
//! The loop scrolls the sentinel into view whenever the reader reaches the
//! end and promotes pending posts every few hundred milliseconds.
//!
//! Run with `RUST_LOG=debug` to watch the paginator at work.

use crossbeam_channel::unbounded;
use feedwheel::{
    Feed, FetchError, FetchState, Item, ItemCache, LiveChannel, LiveEvent, Page, Paginator,
    PaginatorConfig, Sentinel, SentinelBounds, Step,
};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Post {
    id: u64,
    text: String,
}

impl Item for Post {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

fn post(id: u64, text: &str) -> Post {
    Post {
        id,
        text: format!("{text} #{id}"),
    }
}

fn main() {
    env_logger::init();

    println!("Feedwheel Demo");
    println!("==============");
    println!();

    let mut cursor = 1000u64;
    let source = move || -> Result<Page<Post>, FetchError> {
        thread::sleep(Duration::from_millis(80));
        if cursor <= 940 {
            return Ok(Page::end());
        }
        let items = (cursor - 15..cursor).rev().map(|id| post(id, "older")).collect();
        cursor -= 15;
        Ok(Page::more(items))
    };

    let sentinel = Sentinel::new();
    let paginator = Paginator::builder(source, ItemCache::new())
        .config(PaginatorConfig::default().with_geometry_interval(Duration::from_millis(50)))
        .sentinel(sentinel.clone())
        .restorer(|| println!("  (scroll position restored)"))
        .build();

    let (live, connector) = LiveChannel::pending();
    let streamer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        let (tx, rx) = unbounded();
        if !connector.connect(rx) {
            return;
        }
        for id in 1001..1006 {
            thread::sleep(Duration::from_millis(120));
            let _ = tx.send(LiveEvent::update(post(id, "fresh")));
        }
        let _ = tx.send(LiveEvent::Updated(post(999, "edited")));
        let _ = tx.send(LiveEvent::Deleted(998));
        let _ = tx.send(LiveEvent::malformed("{\"event\":\"update\"", "truncated payload"));
    });

    let mut feed = Feed::new(paginator, live);
    let started = Instant::now();
    let mut last_promote = Instant::now();

    while started.elapsed() < Duration::from_secs(3) {
        // The reader is always at the bottom of what is shown
        if feed.paginator().state() == FetchState::Idle {
            sentinel.place(SentinelBounds::new(600.0, 800.0));
        } else {
            sentinel.detach();
        }

        match feed.step(Duration::from_millis(16)) {
            Step::Fetched(applied) => println!(
                "fetched: {applied:?} -> {} shown, {} held",
                feed.paginator().items().len(),
                feed.paginator().lookahead().len()
            ),
            Step::Live(merged) => println!(
                "live: {merged:?} ({} pending)",
                feed.paginator().pending().len()
            ),
            Step::LiveConnected => println!("live channel connected"),
            Step::LiveClosed => println!("live channel closed"),
            Step::Idle | Step::Tick => {}
            other => println!("{other:?}"),
        }

        if last_promote.elapsed() > Duration::from_millis(400) {
            let promoted = feed.paginator_mut().update();
            if promoted > 0 {
                println!("promoted {promoted} new posts");
            }
            last_promote = Instant::now();
        }
    }

    let _ = streamer.join();
    feed.paginator_mut().update();

    println!();
    println!("Final feed ({:?}):", feed.paginator().state());
    for post in feed.paginator().items().iter().take(12) {
        println!("  {:>5}  {}", post.id, post.text);
    }
    println!("  ... {} posts total", feed.paginator().items().len());
}
