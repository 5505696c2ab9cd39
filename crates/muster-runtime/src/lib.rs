//! Runtime layer of the Muster composition runtime.
//!
//! This crate owns everything that is process- or container-global: the
//! [`Hq`] container with its cyclic dependency loader, the signal
//! dispatch hub and its connection tables, the ambient current-HQ
//! stack, base resolution, and configuration.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Component SDK Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-types   : HqId, ReceiverId, SignalScope, ErrorCode  │
//! │  muster-signal  : Signal, Message, Receiver                 │
//! │  muster-mount   : Mountpoint, MountpointRegistry            │
//! │  muster-base    : Base trait, Wiring                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-runtime : Hq, BaseSpec, dispatch hub  ◄── HERE      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Putting it together
//!
//! ```
//! use muster_base::{Base, Wiring};
//! use muster_runtime::{BaseSpec, Hq, SignalExt, StaticBaseResolver};
//! use muster_signal::{Receiver, Signal};
//! use serde::Deserialize;
//! use std::any::Any;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct Ping;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct PingMessage {
//!     #[serde(default)]
//!     count: usize,
//! }
//!
//! impl Signal for Ping {
//!     const NAME: &'static str = "ping";
//!     type Message = PingMessage;
//! }
//!
//! #[derive(Default)]
//! struct Sonar {
//!     pings: AtomicUsize,
//! }
//!
//! impl Base for Sonar {
//!     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
//!         self
//!     }
//!
//!     fn wiring(self: Arc<Self>) -> Wiring {
//!         let me = Arc::clone(&self);
//!         Wiring::new().respond::<Ping>(Receiver::from_fn(move |msg: PingMessage| {
//!             me.pings.fetch_add(msg.count, Ordering::SeqCst);
//!             Ok(())
//!         }))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let resolver = StaticBaseResolver::new().with(BaseSpec {
//!     name: "sonar",
//!     dependencies: &[],
//!     build: |_| Ok(Arc::new(Sonar::default())),
//! });
//!
//! let hq = Hq::builder().resolver(resolver).build();
//! hq.load_dependencies(&["sonar"]).unwrap();
//!
//! Ping::send(PingMessage { count: 3 }, Some(&hq)).unwrap();
//! tokio::task::yield_now().await;
//!
//! let sonar = hq.get::<Sonar>().unwrap();
//! assert_eq!(sonar.pings.load(Ordering::SeqCst), 3);
//! # }
//! ```

mod config;
mod context;
mod current;
mod error;
mod ext;
mod hq;
mod hub;
mod resolver;

pub use config::{ConfigError, MusterConfig};
pub use context::BaseContext;
pub use current::CurrentGuard;
pub use error::LoadError;
pub use ext::SignalExt;
pub use hq::{current_base, Hq, HqBuilder};
pub use resolver::{BaseResolver, BaseSpec, StaticBaseResolver};
