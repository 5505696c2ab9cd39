//! Core types for the Muster composition runtime.
//!
//! This crate is the bottom of the dependency stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Component SDK Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-types   : HqId, ReceiverId, SignalScope, ErrorCode  │ ◄── HERE
//! │  muster-signal  : Signal, Message, Receiver                 │
//! │  muster-mount   : Mountpoint, MountpointRegistry            │
//! │  muster-base    : Base trait, Wiring                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-runtime : Hq, dependency loading, dispatch          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! It defines the identifier types shared by every layer and the
//! [`ErrorCode`] trait that gives all Muster errors a uniform,
//! machine-readable surface.

mod error;
mod id;
mod scope;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{HqId, ReceiverId};
pub use scope::SignalScope;
