//! The four typed messages this registry stores, plus the signed envelope
//! that wraps each of them on the wire.

use serde::{Deserialize, Serialize};

/// 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// 65-byte (r || s || v) Ethereum signature.
pub type Bytes65Sig = [u8; 65];

pub const ZERO_ADDRESS: Address = [0u8; 20];

/// IPFS v0 base58 CIDs used throughout this system are always this long.
pub const CID_LEN: usize = 46;

/// One signer named inside a [`ProofOfAuthorityMsg`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    #[serde(with = "crate::hexfmt::address")]
    pub addr: Address,
    pub metadata: String,
}

/// Declares who is entitled to sign a given agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfAuthorityMsg {
    pub name: String,
    #[serde(with = "crate::hexfmt::address")]
    pub from: Address,
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    pub signers: Vec<Signer>,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// One signer's acknowledgment of an authority's agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfSignatureMsg {
    pub name: String,
    #[serde(with = "crate::hexfmt::address")]
    pub signer: Address,
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// Bundles every Proof-of-Signature for an agreement into one completed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOfAgreementMsg {
    #[serde(rename = "agreementCID")]
    pub agreement_cid: String,
    #[serde(rename = "signatureCIDs")]
    pub signature_cids: Vec<String>,
    pub app: String,
    pub timestamp: u64,
    pub metadata: String,
}

/// A message together with the signature over its EIP-712 digest and the
/// content-address it is to be stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProof<T> {
    pub message: T,
    #[serde(with = "crate::hexfmt::sig65")]
    pub signature: Bytes65Sig,
    #[serde(rename = "proofCID")]
    pub proof_cid: String,
}

pub type SignedProofOfAuthority = SignedProof<ProofOfAuthorityMsg>;
pub type SignedProofOfSignature = SignedProof<ProofOfSignatureMsg>;
pub type SignedProofOfAgreement = SignedProof<ProofOfAgreementMsg>;

/// The canonical proof name strings validated by [`crate::validate`].
pub const NAME_PROOF_OF_AUTHORITY: &str = "Proof-of-Authority";
pub const NAME_PROOF_OF_SIGNATURE: &str = "Proof-of-Signature";

/// The fixed app literal every message must carry.
pub const APP_NAME: &str = "daosign";
