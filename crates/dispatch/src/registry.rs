//! Sender registry keyed by channel kind.

use std::collections::HashMap;
use std::sync::Arc;

use festivo_core::channels::ChannelKind;
use festivo_db::DbPool;

use crate::sender::email::EmailSender;
use crate::sender::in_app::InAppSender;
use crate::sender::social::SocialDmSender;
use crate::sender::whatsapp::WhatsappLinkSender;
use crate::sender::ChannelSender;

/// Lookup of channel senders.
///
/// One sender per [`ChannelKind`]. Whether a channel is usable is a
/// uniform query (`is_configured`) instead of per-channel env checks
/// scattered through the codebase.
pub struct SenderRegistry {
    senders: HashMap<ChannelKind, Arc<dyn ChannelSender>>,
}

impl SenderRegistry {
    /// An empty registry. Channels without a registered sender dispatch
    /// as `ConfigurationMissing`.
    pub fn new() -> Self {
        Self {
            senders: HashMap::new(),
        }
    }

    /// Register all built-in senders, loading provider credentials from
    /// the environment. Senders with absent credentials stay registered
    /// and report `ConfigurationMissing` on every attempt.
    pub fn from_env(pool: DbPool) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(EmailSender::from_env()));
        registry.register(Arc::new(WhatsappLinkSender::new()));
        registry.register(Arc::new(SocialDmSender::from_env()));
        registry.register(Arc::new(InAppSender::new(pool)));
        registry
    }

    /// Register a sender under its own channel kind, replacing any
    /// previous sender for that channel.
    pub fn register(&mut self, sender: Arc<dyn ChannelSender>) {
        self.senders.insert(sender.channel(), sender);
    }

    /// Look up the sender for a channel.
    pub fn get(&self, channel: ChannelKind) -> Option<&Arc<dyn ChannelSender>> {
        self.senders.get(&channel)
    }

    /// Channels that are registered and fully configured, in canonical
    /// channel order.
    pub fn configured_channels(&self) -> Vec<ChannelKind> {
        ChannelKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.senders.get(kind).is_some_and(|s| s.is_configured()))
            .collect()
    }
}

impl Default for SenderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_senders() {
        let registry = SenderRegistry::new();
        assert!(registry.get(ChannelKind::Email).is_none());
        assert!(registry.configured_channels().is_empty());
    }

    #[test]
    fn register_keys_by_the_senders_own_channel() {
        let mut registry = SenderRegistry::new();
        registry.register(Arc::new(WhatsappLinkSender::new()));

        assert!(registry.get(ChannelKind::Whatsapp).is_some());
        assert!(registry.get(ChannelKind::Email).is_none());
    }

    #[test]
    fn configured_channels_excludes_unconfigured_senders() {
        let mut registry = SenderRegistry::new();
        // WhatsApp needs no credentials; email without config does not
        // count as configured.
        registry.register(Arc::new(WhatsappLinkSender::new()));
        registry.register(Arc::new(EmailSender::new(None)));

        assert_eq!(registry.configured_channels(), vec![ChannelKind::Whatsapp]);
    }
}
