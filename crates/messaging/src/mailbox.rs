//! Per-agent mailbox
//!
//! Unbounded multi-producer, single-consumer FIFO. The [`Postbox`] half is
//! cloned into the router; the [`Mailbox`] half is owned by the agent's
//! message-consuming behavior.

use bourse_core::{AgentId, Message};
use tokio::sync::{mpsc, watch};

/// Outcome of a blocking receive
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Message(Message),
    /// The owning agent was stopped while waiting
    Cancelled,
}

/// Sending half of an agent's mailbox
#[derive(Debug, Clone)]
pub struct Postbox {
    owner: AgentId,
    tx: mpsc::UnboundedSender<Message>,
}

impl Postbox {
    pub fn owner(&self) -> &AgentId {
        &self.owner
    }

    /// Enqueue a message
    ///
    /// Never blocks and never drops while the mailbox is alive. Once the
    /// owning agent is torn down this is a no-op returning `false`.
    pub fn post(&self, message: Message) -> bool {
        self.tx.send(message).is_ok()
    }

    /// Whether the receiving half has been torn down
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of an agent's mailbox
#[derive(Debug)]
pub struct Mailbox {
    owner: AgentId,
    rx: mpsc::UnboundedReceiver<Message>,
    /// Flips to `true` when the owning agent is asked to stop
    stop: watch::Receiver<bool>,
}

impl Mailbox {
    /// Create a postbox/mailbox pair for `owner`, cancellable through `stop`
    pub fn channel(owner: AgentId, stop: watch::Receiver<bool>) -> (Postbox, Mailbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Postbox {
                owner: owner.clone(),
                tx,
            },
            Mailbox { owner, rx, stop },
        )
    }

    pub fn owner(&self) -> &AgentId {
        &self.owner
    }

    /// Take the next message without waiting
    pub fn try_receive(&mut self) -> Option<Message> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next message
    ///
    /// Suspends without polling while the queue is empty. Returns
    /// [`Received::Cancelled`] as soon as the owner is stopped, even if
    /// messages are still queued.
    pub async fn receive(&mut self) -> Received {
        loop {
            if *self.stop.borrow_and_update() {
                return Received::Cancelled;
            }

            tokio::select! {
                biased;

                changed = self.stop.changed() => {
                    if changed.is_err() {
                        // Stop sender gone: nobody can drive this agent any more
                        return Received::Cancelled;
                    }
                }

                message = self.rx.recv() => {
                    return match message {
                        Some(message) => Received::Message(message),
                        None => Received::Cancelled,
                    };
                }
            }
        }
    }

    /// Tear down: later posts become no-ops, queued messages are discarded
    pub fn close(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pair(owner: &str) -> (Postbox, Mailbox, watch::Sender<bool>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (postbox, mailbox) = Mailbox::channel(AgentId::new(owner), stop_rx);
        (postbox, mailbox, stop_tx)
    }

    #[tokio::test]
    async fn test_post_then_receive_in_order() {
        let (postbox, mut mailbox, _stop) = pair("info-1");
        let sender = AgentId::new("C1");

        assert!(postbox.post(Message::inform(sender.clone(), "C1:success")));
        assert!(postbox.post(Message::inform(sender, "C1:fail")));

        match mailbox.receive().await {
            Received::Message(m) => assert_eq!(m.content, "C1:success"),
            Received::Cancelled => panic!("unexpected cancel"),
        }
        assert_eq!(mailbox.try_receive().unwrap().content, "C1:fail");
        assert!(mailbox.try_receive().is_none());
    }

    #[tokio::test]
    async fn test_receive_wakes_on_post() {
        let (postbox, mut mailbox, _stop) = pair("info-1");

        let waiter = tokio::spawn(async move { mailbox.receive().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        postbox.post(Message::inform(AgentId::new("C2"), "C2:risk"));

        match waiter.await.unwrap() {
            Received::Message(m) => assert_eq!(m.content, "C2:risk"),
            Received::Cancelled => panic!("unexpected cancel"),
        }
    }

    #[tokio::test]
    async fn test_stop_cancels_blocked_receive() {
        let (_postbox, mut mailbox, stop) = pair("info-1");

        let waiter = tokio::spawn(async move { mailbox.receive().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        stop.send_replace(true);

        assert_eq!(waiter.await.unwrap(), Received::Cancelled);
    }

    #[tokio::test]
    async fn test_dropped_stop_sender_cancels() {
        let (_postbox, mut mailbox, stop) = pair("info-1");
        drop(stop);
        assert_eq!(mailbox.receive().await, Received::Cancelled);
    }

    #[test]
    fn test_post_after_teardown_is_noop() {
        let (postbox, mut mailbox, _stop) = pair("info-1");
        postbox.post(Message::inform(AgentId::new("C1"), "C1:risk"));

        mailbox.close();

        assert!(postbox.is_closed());
        assert!(!postbox.post(Message::inform(AgentId::new("C1"), "C1:fail")));
        assert!(mailbox.try_receive().is_none());
    }
}
