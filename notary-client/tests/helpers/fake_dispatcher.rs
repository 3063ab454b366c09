//! Scripted dispatcher for coordinator tests
//!
//! Replies are consumed in order; once exhausted every call answers
//! `Ok({})`. An optional gate holds each call until the test releases it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use notary_client::Dispatcher;
use notary_common::{Address, ContentHash, DispatchOutcome, SelectedFile};

/// One recorded dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit { file: String, address: String },
    VerifyFile { file: String },
    VerifyHash { hash: String },
}

#[derive(Default)]
pub struct FakeDispatcher {
    calls: Rc<RefCell<Vec<Call>>>,
    replies: RefCell<VecDeque<DispatchOutcome>>,
    gate: Option<Rc<Notify>>,
}

impl FakeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unanswered call
    pub fn reply(self, outcome: DispatchOutcome) -> Self {
        self.replies.borrow_mut().push_back(outcome);
        self
    }

    /// Hold every call until `gate` is notified
    pub fn gated(mut self, gate: Rc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Shared call log, still readable after the dispatcher is moved
    pub fn calls(&self) -> Rc<RefCell<Vec<Call>>> {
        Rc::clone(&self.calls)
    }

    async fn answer(&self, call: Call) -> DispatchOutcome {
        self.calls.borrow_mut().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| DispatchOutcome::Ok(json!({})))
    }
}

#[async_trait(?Send)]
impl Dispatcher for FakeDispatcher {
    async fn submit_file(&self, file: &SelectedFile, address: &Address) -> DispatchOutcome {
        self.answer(Call::Submit {
            file: file.name.clone(),
            address: address.to_string(),
        })
        .await
    }

    async fn verify_file(&self, file: &SelectedFile) -> DispatchOutcome {
        self.answer(Call::VerifyFile {
            file: file.name.clone(),
        })
        .await
    }

    async fn verify_hash(&self, hash: &ContentHash) -> DispatchOutcome {
        self.answer(Call::VerifyHash {
            hash: hash.to_string(),
        })
        .await
    }
}
