//! Message router - explicit and discovery-based delivery

use bourse_core::{AgentId, Message};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::directory::Directory;
use crate::error::{MessagingError, Result};
use crate::mailbox::Postbox;

/// Routes messages into agent mailboxes
///
/// Holds the postbox of every live agent. Broadcasts resolve their receivers
/// through the [`Directory`] at call time.
pub struct MessageRouter {
    directory: Arc<Directory>,
    postboxes: DashMap<AgentId, Postbox>,
}

impl MessageRouter {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            directory,
            postboxes: DashMap::new(),
        }
    }

    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    /// Make `postbox` reachable under its owner's identity
    pub fn register_mailbox(&self, postbox: Postbox) -> Result<()> {
        match self.postboxes.entry(postbox.owner().clone()) {
            Entry::Occupied(entry) => {
                Err(MessagingError::DuplicateMailbox(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(postbox);
                Ok(())
            }
        }
    }

    /// Forget an agent's postbox; later sends to it are skipped
    pub fn remove_mailbox(&self, agent: &AgentId) -> bool {
        self.postboxes.remove(agent).is_some()
    }

    pub fn has_mailbox(&self, agent: &AgentId) -> bool {
        self.postboxes.contains_key(agent)
    }

    /// Post one message to one agent
    ///
    /// Fails with `MailboxClosed` when the receiver is still registered but
    /// no longer reads its mailbox (stopped, failed, or without a cyclic
    /// behavior); the message is dropped.
    pub fn deliver(&self, message: Message, receiver: &AgentId) -> Result<()> {
        let postbox = self
            .postboxes
            .get(receiver)
            .ok_or_else(|| MessagingError::UnknownReceiver(receiver.clone()))?;
        if postbox.post(message) {
            Ok(())
        } else {
            Err(MessagingError::MailboxClosed(receiver.clone()))
        }
    }

    /// Post `message` to each explicit receiver
    ///
    /// Unknown receivers and closed mailboxes are skipped. Returns how many
    /// mailboxes it reached.
    pub fn send<'a>(
        &self,
        message: &Message,
        receivers: impl IntoIterator<Item = &'a AgentId>,
    ) -> usize {
        let mut delivered = 0;
        for receiver in receivers {
            match self.deliver(message.clone(), receiver) {
                Ok(()) => delivered += 1,
                Err(e @ MessagingError::MailboxClosed(_)) => {
                    log::debug!("[{}] {}, message dropped", message.sender, e)
                }
                Err(e) => log::warn!("[{}] {}", message.sender, e),
            }
        }
        delivered
    }

    /// Post `message` to every agent registered under `service_type`
    ///
    /// Receivers are resolved at call time; each gets the message exactly
    /// once. Returns how many mailboxes it reached.
    pub fn broadcast(&self, message: &Message, service_type: &str) -> usize {
        let receivers = self.directory.find_by_type(service_type);
        let delivered = self.send(message, &receivers);
        log::debug!(
            "[{}] Broadcast '{}' to {} {} subscriber(s)",
            message.sender,
            message.content,
            delivered,
            service_type
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::Mailbox;
    use bourse_core::{EVENT_SUBSCRIBER, ServiceDescriptor};
    use tokio::sync::watch;

    fn router() -> MessageRouter {
        MessageRouter::new(Arc::new(Directory::new()))
    }

    fn mailbox(router: &MessageRouter, name: &str, stop: &watch::Sender<bool>) -> Mailbox {
        let (postbox, mailbox) = Mailbox::channel(AgentId::new(name), stop.subscribe());
        router.register_mailbox(postbox).unwrap();
        mailbox
    }

    #[test]
    fn test_duplicate_mailbox_rejected() {
        let router = router();
        let (stop, _) = watch::channel(false);
        let _first = mailbox(&router, "info-1", &stop);

        let (postbox, _second) = Mailbox::channel(AgentId::new("info-1"), stop.subscribe());
        assert_eq!(
            router.register_mailbox(postbox).unwrap_err(),
            MessagingError::DuplicateMailbox(AgentId::new("info-1"))
        );
    }

    #[test]
    fn test_send_to_explicit_receivers() {
        let router = router();
        let (stop, _) = watch::channel(false);
        let mut a = mailbox(&router, "a", &stop);
        let mut b = mailbox(&router, "b", &stop);

        let msg = Message::inform(AgentId::new("C1"), "C1:success");
        let targets = [AgentId::new("a"), AgentId::new("ghost")];
        assert_eq!(router.send(&msg, &targets), 1);

        assert_eq!(a.try_receive().unwrap().content, "C1:success");
        assert!(b.try_receive().is_none());
    }

    #[test]
    fn test_broadcast_uses_directory() {
        let router = router();
        let (stop, _) = watch::channel(false);
        let mut a = mailbox(&router, "a", &stop);
        let mut b = mailbox(&router, "b", &stop);
        router
            .directory()
            .register(&AgentId::new("a"), &ServiceDescriptor::event_subscriber());

        let msg = Message::inform(AgentId::new("C1"), "C1:fail");
        assert_eq!(router.broadcast(&msg, EVENT_SUBSCRIBER), 1);

        assert_eq!(a.try_receive().unwrap(), msg);
        assert!(b.try_receive().is_none());
        assert_eq!(router.broadcast(&msg, "nobody"), 0);
    }

    #[test]
    fn test_closed_mailbox_is_not_counted() {
        let router = router();
        let (stop, _) = watch::channel(false);
        let mut live = mailbox(&router, "live", &stop);
        let mut gone = mailbox(&router, "gone", &stop);
        for name in ["live", "gone"] {
            router
                .directory()
                .register(&AgentId::new(name), &ServiceDescriptor::event_subscriber());
        }
        gone.close();

        let msg = Message::inform(AgentId::new("company-C1"), "C1:risk");
        assert_eq!(
            router.deliver(msg.clone(), &AgentId::new("gone")).unwrap_err(),
            MessagingError::MailboxClosed(AgentId::new("gone"))
        );
        assert_eq!(router.broadcast(&msg, EVENT_SUBSCRIBER), 1);
        assert_eq!(live.try_receive().unwrap(), msg);
    }

    #[test]
    fn test_removed_mailbox_is_skipped() {
        let router = router();
        let (stop, _) = watch::channel(false);
        let _a = mailbox(&router, "a", &stop);

        assert!(router.remove_mailbox(&AgentId::new("a")));
        assert!(!router.has_mailbox(&AgentId::new("a")));
        assert_eq!(
            router
                .deliver(Message::inform(AgentId::new("C1"), "x"), &AgentId::new("a"))
                .unwrap_err(),
            MessagingError::UnknownReceiver(AgentId::new("a"))
        );
    }
}
