//! In-process publish/subscribe bus.
//!
//! Every subscriber registers a set of topics and gets its own inbox.
//! Publishing clones the event into each matching inbox; subscribers drain
//! their inbox whenever they like. There is no global instance: the engine
//! owns the bus and hands `&mut` access to the code that needs it.
//!
//! Inboxes are bounded by `MAX_INBOX_LEN`. A subscriber that stops draining
//! loses its oldest events first.

use std::collections::VecDeque;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::events::{CombatEvent, FxEvent, Topic};

/// Events held for one subscriber before the oldest are dropped.
pub const MAX_INBOX_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(u32);

/// Bit set of topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicSet(u16);

impl TopicSet {
    pub fn all() -> Self {
        Self::of(&Topic::ALL)
    }

    pub fn of(topics: &[Topic]) -> Self {
        Self(topics.iter().fold(0, |bits, t| bits | t.bit()))
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.0 & topic.bit() != 0
    }
}

#[derive(Debug)]
struct Subscription {
    id: SubscriberId,
    topics: TopicSet,
    inbox: VecDeque<CombatEvent>,
    dropped: u64,
}

#[derive(Debug, Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
    /// Every event published since the last `take_published`.
    published: Vec<CombatEvent>,
    fx: Vec<FxEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. The caller must `drain` its inbox regularly;
    /// past `MAX_INBOX_LEN` pending events the oldest are discarded.
    pub fn subscribe(&mut self, topics: TopicSet) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topics,
            inbox: VecDeque::new(),
            dropped: 0,
        });
        id
    }

    /// Remove a subscriber and drop its pending events.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `event` to every subscriber of its topic. Returns the number
    /// of inboxes it reached.
    pub fn publish(&mut self, event: CombatEvent) -> usize {
        let topic = event.topic();
        let mut delivered = 0;
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.topics.contains(topic))
        {
            if sub.inbox.len() >= MAX_INBOX_LEN {
                sub.inbox.pop_front();
                sub.dropped += 1;
                // First drop, then once per MAX_INBOX_LEN drops.
                if sub.dropped % MAX_INBOX_LEN as u64 == 1 {
                    warn!(
                        "subscriber {:?} is not draining; dropped {} events",
                        sub.id, sub.dropped
                    );
                }
            }
            sub.inbox.push_back(event.clone());
            delivered += 1;
        }
        self.published.push(event);
        delivered
    }

    /// Take everything queued for `id`, oldest first.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<CombatEvent> {
        self.subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| s.inbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Events discarded from `id`'s inbox because it was full.
    pub fn dropped(&self, id: SubscriberId) -> u64 {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .map_or(0, |s| s.dropped)
    }

    pub fn pending(&self, id: SubscriberId) -> usize {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .map_or(0, |s| s.inbox.len())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn emit_fx(&mut self, fx: FxEvent) {
        self.fx.push(fx);
    }

    pub fn take_fx(&mut self) -> Vec<FxEvent> {
        std::mem::take(&mut self.fx)
    }

    pub fn take_published(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.published)
    }
}
