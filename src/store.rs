//! Persisted state: the five maps of the data model, plus the invariants
//! that every write must preserve. Single-writer-per-call semantics are
//! given by locking the whole map for the duration of one write — reads
//! proceed concurrently under the same `RwLock`, matching the
//! reader-writer discipline called for by an in-process implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::events::{EventLog, RegistryEvent};
use crate::message::{
    Address, SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature,
};

#[derive(Default)]
pub struct Store {
    poaus: RwLock<HashMap<String, SignedProofOfAuthority>>,
    posis: RwLock<HashMap<String, SignedProofOfSignature>>,
    poags: RwLock<HashMap<String, SignedProofOfAgreement>>,
    proof2signer: RwLock<HashMap<String, Address>>,
    poau_signers_idx: RwLock<HashMap<(String, Address), usize>>,
    events: EventLog,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn get_authority(&self, cid: &str) -> Option<SignedProofOfAuthority> {
        self.poaus.read().unwrap().get(cid).cloned()
    }

    pub fn get_signature(&self, cid: &str) -> Option<SignedProofOfSignature> {
        self.posis.read().unwrap().get(cid).cloned()
    }

    pub fn get_agreement(&self, cid: &str) -> Option<SignedProofOfAgreement> {
        self.poags.read().unwrap().get(cid).cloned()
    }

    pub fn signer_of(&self, proof_cid: &str) -> Option<Address> {
        self.proof2signer.read().unwrap().get(proof_cid).copied()
    }

    /// Index of `signer` inside the authority stored under `authority_cid`,
    /// if that authority exists and lists the signer. Absence is an
    /// explicit `None` rather than the zero-default lookup the source
    /// contract relies on (see the design note on default-zero maps).
    pub fn authority_signer_index(&self, authority_cid: &str, signer: Address) -> Option<usize> {
        self.poau_signers_idx
            .read()
            .unwrap()
            .get(&(authority_cid.to_string(), signer))
            .copied()
    }

    /// Persists a Proof-of-Authority, indexes its signers (later duplicate
    /// addresses win, matching declared order), records the recovered
    /// signer, and emits `NewProofOfAuthority`.
    pub fn put_authority(&self, proof: SignedProofOfAuthority, recovered: Address) {
        let cid = proof.proof_cid.clone();

        {
            let mut idx = self.poau_signers_idx.write().unwrap();
            for (i, s) in proof.message.signers.iter().enumerate() {
                idx.insert((cid.clone(), s.addr), i);
            }
        }
        self.proof2signer.write().unwrap().insert(cid.clone(), recovered);
        self.poaus.write().unwrap().insert(cid, proof.clone());

        self.events.emit(RegistryEvent::NewProofOfAuthority(proof));
    }

    /// Persists a Proof-of-Signature and emits `NewProofOfSignature`.
    pub fn put_signature(&self, proof: SignedProofOfSignature, recovered: Address) {
        let cid = proof.proof_cid.clone();
        self.proof2signer.write().unwrap().insert(cid.clone(), recovered);
        self.posis.write().unwrap().insert(cid, proof.clone());

        self.events.emit(RegistryEvent::NewProofOfSignature(proof));
    }

    /// Persists a Proof-of-Agreement and emits `NewProofOfAgreement`.
    /// Agreement messages carry no signer field, so `proof2signer` is left
    /// unset for this key.
    pub fn put_agreement(&self, proof: SignedProofOfAgreement) {
        let cid = proof.proof_cid.clone();
        self.poags.write().unwrap().insert(cid, proof.clone());

        self.events.emit(RegistryEvent::NewProofOfAgreement(proof));
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.poaus.read().unwrap().len(),
            self.posis.read().unwrap().len(),
            self.poags.read().unwrap().len(),
        )
    }
}
