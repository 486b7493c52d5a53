//! AI chat with a simulated assistant
//!
//! The transcript ([`ChatSession`]) is plain state owned by the UI. Replies
//! come from a [`ChatBackend`] running on a tokio task ([`spawn_chat_worker`]),
//! so the UI keeps drawing while it waits.

mod session;
mod worker;

pub use session::{ChatSession, OverlapPolicy};
pub use worker::{ChatCommand, ChatEvent, ChatHandle, spawn_chat_worker};

use std::future::Future;
use std::time::Duration;

use rand::seq::IndexedRandom;

use crate::error::{Error, Result};

/// Replies the simulated assistant picks from
pub const CANNED_REPLIES: &[&str] = &[
    "I'd be happy to help you with that! Let me think about the best approach...\n\n\
     Based on what you've described, here are some suggestions:\n\n\
     1. **Start with the basics** - Make sure you have a clear understanding of the fundamentals.\n\
     2. **Break it down** - Complex problems become manageable when divided into smaller parts.\n\
     3. **Iterate and improve** - Don't aim for perfection on the first try.\n\n\
     Would you like me to elaborate on any of these points?",
    "That's an interesting question! Here's my analysis:\n\n\
     The key factors to consider are:\n\
     • Context and goals\n\
     • Available resources\n\
     • Time constraints\n\
     • Potential risks and benefits\n\n\
     Let me know if you'd like me to dive deeper into any specific aspect.",
    "Great question! I can help you explore this further.\n\n\
     From my understanding, the best approach would be to:\n\n\
     **Step 1:** Define your objectives clearly\n\
     **Step 2:** Research existing solutions\n\
     **Step 3:** Create a prototype or MVP\n\
     **Step 4:** Test and gather feedback\n\
     **Step 5:** Iterate based on learnings\n\n\
     Shall I help you get started with any of these steps?",
];

/// Default delay before the simulated assistant answers
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Something that answers chat prompts
pub trait ChatBackend: Send + Sync + 'static {
    /// Produce one reply to `prompt`
    fn reply(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Answers after a fixed delay with a reply drawn uniformly from a pool
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
    pool: Vec<String>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl SimulatedBackend {
    /// Backend using the built-in canned replies
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pool: CANNED_REPLIES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Backend with a custom reply pool; the pool must not be empty
    pub fn with_pool(delay: Duration, pool: Vec<String>) -> Result<Self> {
        if pool.is_empty() {
            return Err(Error::validation("reply pool is empty"));
        }
        Ok(Self { delay, pool })
    }

    /// Fixed reply delay
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replies this backend can produce
    pub fn pool(&self) -> &[String] {
        &self.pool
    }
}

impl ChatBackend for SimulatedBackend {
    async fn reply(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Simulating reply to {} chars", prompt.chars().count());
        tokio::time::sleep(self.delay).await;

        self.pool
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| Error::validation("reply pool is empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_rejected() {
        assert!(SimulatedBackend::with_pool(Duration::ZERO, Vec::new()).is_err());
    }

    #[test]
    fn test_reply_comes_from_pool() {
        let backend = SimulatedBackend::new(Duration::from_millis(1));
        for _ in 0..10 {
            let reply = tokio_test::block_on(backend.reply("hello")).unwrap();
            assert!(backend.pool().contains(&reply));
        }
    }

    #[tokio::test]
    async fn test_reply_waits_for_delay() {
        let backend = SimulatedBackend::with_pool(
            Duration::from_millis(30),
            vec!["only".to_string()],
        )
        .unwrap();

        let started = std::time::Instant::now();
        assert_eq!(backend.reply("hi").await.unwrap(), "only");
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
