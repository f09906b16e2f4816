//! The three `store*` and three `get*` entry points (component E). These
//! wrap the hasher, recoverer, validator, and store, and are the only
//! functions that should be called from outside this crate — `api.rs` is
//! a thin axum adapter over them.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::eip712::{self, Message};
use crate::message::{
    ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, SignedProofOfAgreement,
    SignedProofOfAuthority, SignedProofOfSignature,
};
use crate::recover::recover;
use crate::schema::{self, FieldType};
use crate::store::Store;
use crate::validate;
use crate::RegistryError;

#[derive(Debug, Clone, Serialize)]
pub struct DomainView {
    pub name: &'static str,
    pub version: &'static str,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    #[serde(rename = "verifyingContract")]
    pub verifying_contract: String,
}

fn domain_view() -> DomainView {
    DomainView {
        name: eip712::DOMAIN_NAME,
        version: eip712::DOMAIN_VERSION,
        chain_id: eip712::DOMAIN_CHAIN_ID,
        verifying_contract: format!("0x{}", hex::encode(eip712::DOMAIN_VERIFYING_CONTRACT)),
    }
}

/// The enriched read response shape: the raw stored message plus the
/// static EIP-712 schema and domain values.
#[derive(Debug, Clone, Serialize)]
pub struct ProofView<T> {
    pub domain: DomainView,
    pub types: BTreeMap<&'static str, Vec<FieldType>>,
    #[serde(rename = "primaryType")]
    pub primary_type: &'static str,
    pub message: T,
    #[serde(with = "crate::hexfmt::sig65")]
    pub signature: [u8; 65],
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

fn view<T: Clone>(primary_type: &'static str, proof_cid: String, message: T, signature: [u8; 65]) -> ProofView<T> {
    ProofView {
        domain: domain_view(),
        types: schema::types_for(primary_type),
        primary_type,
        message,
        signature,
        proof_cid,
    }
}

/// Recovers the signer from `digest(message)` and `signature`, requires it
/// equal `message.from`, validates, then stores. Fails atomically — no
/// partial state is visible on any error.
pub fn store_proof_of_authority(
    store: &Store,
    proof: SignedProofOfAuthority,
) -> Result<(), RegistryError> {
    let digest = Message::Authority(&proof.message).digest();
    let recovered = recover(&digest, &proof.signature).map_err(RegistryError::InvalidSignature)?;
    if recovered != proof.message.from {
        return Err(RegistryError::SignerMismatch);
    }
    validate::validate_authority(&proof.proof_cid, &proof.message)?;
    store.put_authority(proof, recovered);
    Ok(())
}

/// Recovers the signer and requires it equal `message.signer`, validates
/// against the referenced authority, then stores.
pub fn store_proof_of_signature(
    store: &Store,
    proof: SignedProofOfSignature,
) -> Result<(), RegistryError> {
    let digest = Message::Signature(&proof.message).digest();
    let recovered = recover(&digest, &proof.signature).map_err(RegistryError::InvalidSignature)?;
    if recovered != proof.message.signer {
        return Err(RegistryError::SignerMismatch);
    }
    validate::validate_signature(store, &proof.proof_cid, &proof.message)?;
    store.put_signature(proof, recovered);
    Ok(())
}

/// Validates and stores. No recovery gate — agreement records are
/// system-generated and carry no authenticated signer field.
pub fn store_proof_of_agreement(
    store: &Store,
    proof: SignedProofOfAgreement,
) -> Result<(), RegistryError> {
    validate::validate_agreement(store, &proof.proof_cid, &proof.message)?;
    store.put_agreement(proof);
    Ok(())
}

pub fn get_proof_of_authority(store: &Store, cid: &str) -> Option<ProofView<ProofOfAuthorityMsg>> {
    let proof = store.get_authority(cid)?;
    Some(view(
        schema::PRIMARY_TYPE_AUTHORITY,
        proof.proof_cid,
        proof.message,
        proof.signature,
    ))
}

pub fn get_proof_of_signature(store: &Store, cid: &str) -> Option<ProofView<ProofOfSignatureMsg>> {
    let proof = store.get_signature(cid)?;
    Some(view(
        schema::PRIMARY_TYPE_SIGNATURE,
        proof.proof_cid,
        proof.message,
        proof.signature,
    ))
}

pub fn get_proof_of_agreement(store: &Store, cid: &str) -> Option<ProofView<ProofOfAgreementMsg>> {
    let proof = store.get_agreement(cid)?;
    Some(view(
        schema::PRIMARY_TYPE_AGREEMENT,
        proof.proof_cid,
        proof.message,
        proof.signature,
    ))
}
