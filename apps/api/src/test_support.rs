//! Test doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::agent_client::{AgentError, AgentInvoker};
use crate::search::models::RawAgentReply;

enum Outcome {
    Reply(RawAgentReply),
    Reject(String),
}

/// Agent that always answers the same way and records what it was sent.
pub struct StubAgent {
    outcome: Outcome,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, Vec<String>)>>,
}

impl StubAgent {
    pub fn replying(reply: RawAgentReply) -> Self {
        Self::with(Outcome::Reply(reply))
    }

    pub fn rejecting(message: &str) -> Self {
        Self::with(Outcome::Reject(message.to_string()))
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, Vec<String>)> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentInvoker for StubAgent {
    async fn invoke(
        &self,
        message: &str,
        attachments: &[String],
    ) -> Result<RawAgentReply, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((message.to_string(), attachments.to_vec()));

        match &self.outcome {
            Outcome::Reply(reply) => Ok(reply.clone()),
            Outcome::Reject(message) => Err(AgentError::Rejected(message.clone())),
        }
    }
}
