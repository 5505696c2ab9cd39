//! Ambient current-HQ discipline.
//!
//! The current-HQ stack is process-wide, so every test here serializes
//! on one lock.

use muster_base::Base;
use muster_runtime::{current_base, BaseSpec, Hq, SignalExt, StaticBaseResolver};
use muster_signal::{Receiver, Signal};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::Deserialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static SERIAL: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Marker;

impl Base for Marker {
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

fn marker_resolver() -> StaticBaseResolver {
    StaticBaseResolver::new().with(BaseSpec {
        name: "marker",
        dependencies: &[],
        build: |_| Ok(Arc::new(Marker)),
    })
}

#[test]
fn no_current_by_default() {
    let _serial = SERIAL.lock();
    assert!(Hq::current().is_none());
}

#[test]
fn guard_sets_and_restores() {
    let _serial = SERIAL.lock();
    let hq = Hq::builder().build();

    {
        let _guard = hq.make_current();
        assert_eq!(Hq::current(), Some(hq.clone()));
    }
    assert!(Hq::current().is_none());
}

#[test]
fn guards_nest_and_unnest() {
    let _serial = SERIAL.lock();
    let outer = Hq::builder().build();
    let inner = Hq::builder().build();

    let _outer_guard = outer.make_current();
    {
        let _inner_guard = inner.make_current();
        assert_eq!(Hq::current(), Some(inner.clone()));
    }
    assert_eq!(Hq::current(), Some(outer));
}

#[test]
fn out_of_order_guard_drop_is_safe() {
    let _serial = SERIAL.lock();
    let a = Hq::builder().build();
    let b = Hq::builder().build();

    let guard_a = a.make_current();
    let guard_b = b.make_current();

    // Dropping the lower guard first leaves the top intact.
    drop(guard_a);
    assert_eq!(Hq::current(), Some(b));

    drop(guard_b);
    assert!(Hq::current().is_none());
}

#[test]
fn unwind_through_a_guard_restores_previous() {
    let _serial = SERIAL.lock();
    let outer = Hq::builder().build();
    let inner = Hq::builder().build();

    let _outer_guard = outer.make_current();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let _inner_guard = inner.make_current();
        panic!("deliberate");
    }));

    assert!(result.is_err());
    assert_eq!(Hq::current(), Some(outer));
}

#[test]
fn reset_replaces_the_top_entry() {
    let _serial = SERIAL.lock();
    let first = Hq::builder().build();
    let second = Hq::builder().build();

    let _guard = first.make_current();
    second.reset();
    assert_eq!(Hq::current(), Some(second.clone()));

    // The guard still owns the (replaced) top entry.
    drop(_guard);
    assert!(Hq::current().is_none());
}

#[test]
fn dropped_container_stops_being_current() {
    let _serial = SERIAL.lock();
    let hq = Hq::builder().build();

    hq.reset();
    assert!(Hq::current().is_some());

    drop(hq);
    assert!(Hq::current().is_none());
}

#[test]
fn current_base_resolves_against_current_container() {
    let _serial = SERIAL.lock();
    let hq = Hq::builder().resolver(marker_resolver()).build();
    hq.load_dependencies(&["marker"]).unwrap();

    assert!(current_base::<Marker>().is_none());

    let _guard = hq.make_current();
    assert!(current_base::<Marker>().is_some());

    let empty = Hq::builder().build();
    let _inner = empty.make_current();
    // A current container without the base is still a miss.
    assert!(current_base::<Marker>().is_none());
}

#[derive(Debug, Clone, Deserialize)]
struct Tick {
    #[allow(dead_code)]
    #[serde(default)]
    n: u32,
}

struct Ticked;

impl Signal for Ticked {
    const NAME: &'static str = "ticked";
    type Message = Tick;
}

#[tokio::test]
async fn unaddressed_send_reaches_the_current_container() {
    let _serial = SERIAL.lock();
    let hq = Hq::builder().build();

    let hits = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&hits);
    Ticked::connect(
        Receiver::from_fn(move |_| {
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
        Some(&hq),
    );

    // Without a current container the scoped receiver is out of reach.
    let scheduled = Ticked::send(Tick { n: 1 }, None).unwrap();
    assert_eq!(scheduled, 0);

    let _guard = hq.make_current();
    let scheduled = Ticked::send(Tick { n: 2 }, None).unwrap();
    assert_eq!(scheduled, 1);

    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
