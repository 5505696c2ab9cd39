//! Mountpoint extension points for the Muster composition runtime.
//!
//! A [`Mountpoint`] is a named extension point: bases contribute
//! callables to it, and any code holding the owning container can read
//! the current ordered set of contributions and invoke them.
//!
//! ```text
//! ┌──────────┐  contribute   ┌──────────────────────┐
//! │  Base A  │ ────────────► │  MountpointRegistry  │
//! └──────────┘               │  (owned by one HQ)   │
//! ┌──────────┐  contribute   │                      │   mounted::<P>()
//! │  Base B  │ ────────────► │  P ► [a1, a2, b1]    │ ◄───────────────
//! └──────────┘               └──────────────────────┘
//! ```
//!
//! Contribution order is registration order; registering the same
//! callable twice keeps both entries. There is no removal operation:
//! contributions live exactly as long as the registry's owning
//! container.
//!
//! # Example
//!
//! ```
//! use muster_mount::{Contribution, Mountpoint, MountpointRegistry};
//!
//! struct Greeters;
//!
//! impl Mountpoint for Greeters {
//!     const NAME: &'static str = "greeters";
//!     type Args = String;
//! }
//!
//! let registry = MountpointRegistry::new();
//! registry.register_for::<Greeters>(|name| println!("hello, {name}"));
//! registry.register_for::<Greeters>(|name| println!("hi, {name}"));
//!
//! for greeter in registry.mounted::<Greeters>() {
//!     greeter.call(&"world".to_string());
//! }
//! ```

mod point;
mod registry;

pub use point::{AnyContribution, Contribution, Mountpoint};
pub use registry::MountpointRegistry;
