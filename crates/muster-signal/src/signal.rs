//! The [`Signal`] trait and its [`Message`] schema contract.

use serde::de::DeserializeOwned;
use std::fmt;

/// Payload schema carried by a signal.
///
/// Blanket-implemented for every type meeting the bounds, so concrete
/// message structs only need the derives:
///
/// - `Clone`: one send fans out to many receivers, each gets its own copy
/// - `Debug`: messages appear in logs when a receiver fails
/// - `DeserializeOwned`: enables the dynamic send path, which builds the
///   message from a `serde_json::Value` and rejects schema mismatches
///   before any receiver is scheduled
/// - `Send + Sync + 'static`: receiver invocations are spawned tasks
pub trait Message: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {}

impl<T> Message for T where T: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {}

/// A typed event channel.
///
/// The implementing type is the channel's identity: connection tables
/// are keyed by it, so two signal types never share receivers even when
/// their message schemas are identical. The type itself is never
/// instantiated; it is a marker carrying the payload schema.
///
/// # Example
///
/// ```
/// use muster_signal::Signal;
/// use serde::Deserialize;
///
/// struct Tick;
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct TickMessage {
///     #[serde(default)]
///     count: u64,
/// }
///
/// impl Signal for Tick {
///     const NAME: &'static str = "tick";
///     type Message = TickMessage;
/// }
///
/// assert_eq!(Tick::NAME, "tick");
/// ```
pub trait Signal: 'static {
    /// Human-readable channel name, used in logs and error messages.
    const NAME: &'static str;

    /// The payload schema for this channel.
    type Message: Message;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct Ping;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct PingMessage {
        #[serde(default = "default_zoom")]
        zoom: u32,
    }

    fn default_zoom() -> u32 {
        10
    }

    impl Signal for Ping {
        const NAME: &'static str = "ping";
        type Message = PingMessage;
    }

    #[test]
    fn signal_name() {
        assert_eq!(Ping::NAME, "ping");
    }

    #[test]
    fn message_defaults_apply_on_dynamic_build() {
        let msg: PingMessage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(msg.zoom, 10);
    }

    #[test]
    fn message_rejects_unknown_fields() {
        let result: Result<PingMessage, _> =
            serde_json::from_value(serde_json::json!({"zoom": 1, "zip": 2}));
        assert!(result.is_err());
    }
}
