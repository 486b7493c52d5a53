//! Chat worker task
//!
//! Uses channels to communicate between the sync TUI loop and the backend.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::ChatBackend;

/// Commands sent from the UI to the chat worker
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Ask for a reply to `prompt`
    Send {
        /// Request id from [`super::ChatSession::submit`]
        request: u64,
        /// User message
        prompt: String,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the chat worker to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The backend answered
    Reply {
        /// Request being answered
        request: u64,
        /// Reply text
        content: String,
    },
    /// The backend failed
    Failed {
        /// Request that failed
        request: u64,
        /// Error message
        message: String,
    },
}

/// Channel handles for communicating with the chat worker
pub struct ChatHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<ChatCommand>,
    /// Receive replies from the worker
    pub event_rx: mpsc::Receiver<ChatEvent>,
}

impl ChatHandle {
    /// Queue a request without blocking the caller
    pub fn send(&self, request: u64, prompt: String) -> crate::error::Result<()> {
        self.cmd_tx
            .try_send(ChatCommand::Send { request, prompt })
            .map_err(|e| crate::error::Error::validation(format!("chat worker unavailable: {e}")))
    }

    /// Next finished reply, if any
    pub fn try_recv(&mut self) -> Option<ChatEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Spawn the chat worker and return handles
///
/// Requests are answered one at a time, in the order they were sent. Must be
/// called from within a tokio runtime.
pub fn spawn_chat_worker<B: ChatBackend>(backend: B) -> ChatHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ChatCommand>(32);
    let (event_tx, event_rx) = mpsc::channel::<ChatEvent>(32);
    let backend = Arc::new(backend);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                ChatCommand::Shutdown => break,
                ChatCommand::Send { request, prompt } => {
                    let event = match backend.reply(&prompt).await {
                        Ok(content) => ChatEvent::Reply { request, content },
                        Err(e) => {
                            tracing::warn!("Chat request {} failed: {}", request, e);
                            ChatEvent::Failed {
                                request,
                                message: e.to_string(),
                            }
                        }
                    };
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("Chat worker stopped");
    });

    ChatHandle { cmd_tx, event_rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatSession, OverlapPolicy, SimulatedBackend};
    use crate::error::{Error, Result};
    use chrono::Utc;
    use std::time::Duration;

    struct Echo;

    impl ChatBackend for Echo {
        async fn reply(&self, prompt: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            if prompt == "fail" {
                return Err(Error::validation("backend down"));
            }
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn test_one_reply_per_submission() {
        let backend = SimulatedBackend::new(Duration::from_millis(5));
        let pool = backend.pool().to_vec();
        let mut handle = spawn_chat_worker(backend);
        let mut session = ChatSession::new(OverlapPolicy::Reject);

        let (request, prompt) = session.submit("Hello", Utc::now()).unwrap();
        handle.send(request, prompt).unwrap();

        match handle.event_rx.recv().await.unwrap() {
            ChatEvent::Reply { request: r, content } => {
                assert_eq!(r, request);
                assert!(pool.contains(&content));
                session.deliver(r, content, Utc::now()).unwrap();
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert_eq!(session.messages().len(), 2);
        assert!(handle.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_queued_replies_keep_order() {
        let mut handle = spawn_chat_worker(Echo);
        let mut session = ChatSession::new(OverlapPolicy::Queue);

        for text in ["one", "two", "three"] {
            let (request, prompt) = session.submit(text, Utc::now()).unwrap();
            handle.send(request, prompt).unwrap();
        }

        let mut replies = Vec::new();
        for _ in 0..3 {
            if let Some(ChatEvent::Reply { request, content }) = handle.event_rx.recv().await {
                session.deliver(request, content.clone(), Utc::now()).unwrap();
                replies.push(content);
            }
        }
        assert_eq!(replies, vec!["echo: one", "echo: two", "echo: three"]);
        assert!(!session.is_waiting());
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let mut handle = spawn_chat_worker(Echo);
        handle.send(7, "fail".to_string()).unwrap();
        assert_eq!(
            handle.event_rx.recv().await,
            Some(ChatEvent::Failed {
                request: 7,
                message: "backend down".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_shutdown_closes_channel() {
        let mut handle = spawn_chat_worker(Echo);
        handle.cmd_tx.send(ChatCommand::Shutdown).await.unwrap();
        assert!(handle.event_rx.recv().await.is_none());
    }
}
