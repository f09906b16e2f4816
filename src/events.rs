//! Append-only event log for accepted writes.
//!
//! Every `store*` call emits the corresponding "New…" event carrying the
//! full stored record, strictly after the state is committed. Modeled on
//! the teacher's audit logger (`tracing` line per entry) but backed by a
//! `tokio::sync::broadcast` channel so observers can subscribe and tail
//! the log, per the publisher/subscriber model this system calls for.

use tokio::sync::broadcast;
use tracing::info;

use crate::message::{SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature};

const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub enum RegistryEvent {
    NewProofOfAuthority(SignedProofOfAuthority),
    NewProofOfSignature(SignedProofOfSignature),
    NewProofOfAgreement(SignedProofOfAgreement),
}

pub struct EventLog {
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: RegistryEvent) {
        match &event {
            RegistryEvent::NewProofOfAuthority(p) => {
                info!(proof_cid = %p.proof_cid, "NewProofOfAuthority");
            }
            RegistryEvent::NewProofOfSignature(p) => {
                info!(proof_cid = %p.proof_cid, "NewProofOfSignature");
            }
            RegistryEvent::NewProofOfAgreement(p) => {
                info!(proof_cid = %p.proof_cid, "NewProofOfAgreement");
            }
        }
        // No active subscriber is not an error — the log is append-only
        // regardless of whether anyone is tailing it.
        let _ = self.sender.send(event);
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since the Unix epoch, used only for log/trace timestamps — the
/// registry itself never validates `timestamp` fields against wall clock.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
