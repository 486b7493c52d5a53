//! Chat transcript state

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{ChatMessage, Role};

/// What happens to a message sent while a reply is still outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Refuse it until the reply arrives
    #[default]
    Reject,
    /// Accept it; replies arrive in submission order
    Queue,
}

/// Transcript plus the requests still waiting for a reply
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending: VecDeque<u64>,
    next_request: u64,
    policy: OverlapPolicy,
}

impl ChatSession {
    /// Empty session
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Overlap policy in force
    pub const fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// At least one reply is outstanding
    pub fn is_waiting(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Outstanding request ids, oldest first
    pub fn pending(&self) -> impl Iterator<Item = u64> + '_ {
        self.pending.iter().copied()
    }

    /// Append the user's message and open a request for its reply
    ///
    /// Returns the request id to hand to the chat worker together with the
    /// trimmed prompt.
    pub fn submit(&mut self, text: &str, now: DateTime<Utc>) -> Result<(u64, String)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("message is empty"));
        }
        if self.policy == OverlapPolicy::Reject && self.is_waiting() {
            return Err(Error::ReplyPending);
        }

        self.messages.push(ChatMessage::new(Role::User, text, now));

        let request = self.next_request;
        self.next_request += 1;
        self.pending.push_back(request);
        Ok((request, text.to_string()))
    }

    /// Append the assistant's reply to `request`
    pub fn deliver(&mut self, request: u64, reply: impl Into<String>, now: DateTime<Utc>) -> Result<()> {
        self.close(request)?;
        self.messages.push(ChatMessage::new(Role::Assistant, reply, now));
        Ok(())
    }

    /// Give up on `request` without a reply (backend failure)
    pub fn fail(&mut self, request: u64) -> Result<()> {
        self.close(request)
    }

    fn close(&mut self, request: u64) -> Result<()> {
        let idx = self
            .pending
            .iter()
            .position(|r| *r == request)
            .ok_or_else(|| Error::not_found("chat request", request.to_string()))?;
        self.pending.remove(idx);
        Ok(())
    }

    /// Empty the transcript; replies still in flight are dropped on arrival
    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_deliver() {
        let mut session = ChatSession::new(OverlapPolicy::Reject);
        let now = Utc::now();

        let (request, prompt) = session.submit("  Hello  ", now).unwrap();
        assert_eq!(prompt, "Hello");
        assert!(session.is_waiting());
        assert_eq!(session.messages().len(), 1);

        session.deliver(request, "Hi!", now).unwrap();
        assert!(!session.is_waiting());
        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut session = ChatSession::default();
        assert!(matches!(session.submit("   ", Utc::now()), Err(Error::Validation(_))));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_reject_policy_blocks_overlap() {
        let mut session = ChatSession::new(OverlapPolicy::Reject);
        session.submit("first", Utc::now()).unwrap();
        assert!(matches!(session.submit("second", Utc::now()), Err(Error::ReplyPending)));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_queue_policy_accepts_overlap() {
        let mut session = ChatSession::new(OverlapPolicy::Queue);
        let (a, _) = session.submit("first", Utc::now()).unwrap();
        let (b, _) = session.submit("second", Utc::now()).unwrap();
        assert_eq!(session.pending().collect::<Vec<_>>(), vec![a, b]);

        session.deliver(a, "one", Utc::now()).unwrap();
        session.deliver(b, "two", Utc::now()).unwrap();
        assert_eq!(session.messages().len(), 4);
    }

    #[test]
    fn test_clear_drops_late_reply() {
        let mut session = ChatSession::new(OverlapPolicy::Reject);
        let (request, _) = session.submit("hello", Utc::now()).unwrap();
        session.clear();
        assert!(session.messages().is_empty());
        assert!(session.deliver(request, "late", Utc::now()).is_err());
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_fail_reopens_input() {
        let mut session = ChatSession::new(OverlapPolicy::Reject);
        let (request, _) = session.submit("hello", Utc::now()).unwrap();
        session.fail(request).unwrap();
        assert!(session.submit("again", Utc::now()).is_ok());
    }
}
