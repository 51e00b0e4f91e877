//! The host-facing delegate protocol.
//!
//! A delegate receives the outcome of every edit cycle: committed values on
//! the change channel, validator rejections on the error channel. Hosts
//! supply one per controller, optionally overridden per section. When the
//! host supplies none, [`LoggingDelegate`] is used so outcomes are never
//! silently dropped.

use ridgeline_core::logging::targets;

use crate::item::PrefItem;
use crate::value::PrefValue;

/// Receives value-change and error notifications from the preferences core.
///
/// `value_changed` is invoked strictly after the committed value has been
/// written to the item; a delegate reading `item.value()` always observes
/// the value it was notified with.
pub trait PrefDelegate: Send + Sync {
    /// A validated candidate was committed to `item`.
    fn value_changed(&self, value: &PrefValue, item: &PrefItem);

    /// A candidate was rejected; `message` is host-displayable.
    fn display_error(&self, message: &str);
}

/// The default delegate: logs every notification through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDelegate;

impl PrefDelegate for LoggingDelegate {
    fn value_changed(&self, value: &PrefValue, item: &PrefItem) {
        tracing::info!(
            target: targets::LIST,
            key = item.key(),
            name = item.display_name(),
            %value,
            "preference changed"
        );
    }

    fn display_error(&self, message: &str) {
        tracing::warn!(target: targets::LIST, reason = message, "preference edit rejected");
    }
}
