//! Structural and cross-referential validation rules (component C).
//! Each function returns `Ok(())` or the exact `ValidationError` whose
//! `Display` is the human-readable message clients receive verbatim.

use thiserror::Error;

use crate::message::{
    ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, APP_NAME, CID_LEN,
    NAME_PROOF_OF_AUTHORITY, NAME_PROOF_OF_SIGNATURE, ZERO_ADDRESS,
};
use crate::store::Store;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid proof CID")]
    InvalidProofCid,
    #[error("Invalid app name")]
    InvalidAppName,
    #[error("Invalid proof name")]
    InvalidProofName,
    #[error("Invalid agreement CID")]
    InvalidAgreementCid,
    #[error("Invalid signer")]
    InvalidSigner,
    #[error("Invalid Proof-of-Authority name")]
    InvalidAuthorityName,
    #[error("Invalid Proofs-of-Signatures length")]
    InvalidSignatureCidsLength,
    #[error("Invalid Proofs-of-Signature signer")]
    InvalidAgreementSigner,
}

fn is_valid_cid(cid: &str) -> bool {
    cid.len() == CID_LEN
}

pub fn validate_authority(proof_cid: &str, message: &ProofOfAuthorityMsg) -> Result<(), ValidationError> {
    if !is_valid_cid(proof_cid) {
        return Err(ValidationError::InvalidProofCid);
    }
    if message.app != APP_NAME {
        return Err(ValidationError::InvalidAppName);
    }
    if message.name != NAME_PROOF_OF_AUTHORITY {
        return Err(ValidationError::InvalidProofName);
    }
    if !is_valid_cid(&message.agreement_cid) {
        return Err(ValidationError::InvalidAgreementCid);
    }
    if message.signers.iter().any(|s| s.addr == ZERO_ADDRESS) {
        return Err(ValidationError::InvalidSigner);
    }
    Ok(())
}

pub fn validate_signature(
    store: &Store,
    proof_cid: &str,
    message: &ProofOfSignatureMsg,
) -> Result<(), ValidationError> {
    if !is_valid_cid(proof_cid) {
        return Err(ValidationError::InvalidProofCid);
    }
    if message.app != APP_NAME {
        return Err(ValidationError::InvalidAppName);
    }
    if message.name != NAME_PROOF_OF_SIGNATURE {
        return Err(ValidationError::InvalidProofName);
    }

    // The source collapses an unknown authority and an unregistered signer
    // into the same failure by indexing with a default-zero map; here the
    // lookup is an explicit `Option`, so both cases fail the same check
    // deliberately rather than by accident.
    match store.authority_signer_index(&message.agreement_cid, message.signer) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidSigner),
    }
}

pub fn validate_agreement(
    store: &Store,
    proof_cid: &str,
    message: &ProofOfAgreementMsg,
) -> Result<(), ValidationError> {
    if !is_valid_cid(proof_cid) {
        return Err(ValidationError::InvalidProofCid);
    }
    if message.app != APP_NAME {
        return Err(ValidationError::InvalidAppName);
    }

    let authority = store.get_authority(&message.agreement_cid);
    let authority = match &authority {
        Some(a) if a.message.name == NAME_PROOF_OF_AUTHORITY => a,
        _ => return Err(ValidationError::InvalidAuthorityName),
    };

    if authority.message.signers.len() != message.signature_cids.len() {
        return Err(ValidationError::InvalidSignatureCidsLength);
    }

    for signature_cid in &message.signature_cids {
        let signature = store.get_signature(signature_cid);
        let signer = match &signature {
            Some(s) => s.message.signer,
            None => return Err(ValidationError::InvalidAgreementSigner),
        };
        if store.authority_signer_index(&message.agreement_cid, signer).is_none() {
            return Err(ValidationError::InvalidAgreementSigner);
        }
    }

    Ok(())
}
