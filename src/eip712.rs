//! EIP-712 structured-data hashing.
//!
//! Four type strings are fixed for this system; their keccak256 hashes are
//! computed once and cached. `domain_separator()` and `digest()` follow the
//! same `0x19 0x01 || domain || structHash` composition the teacher's
//! `AttestationDomain`/`AttestationData` pair used for a single message
//! type — generalized here to dispatch over all four.

use alloy_primitives::{keccak256, B256, U256};
use once_cell::sync::Lazy;

use crate::message::{Address, ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, Signer};

pub const DOMAIN_NAME: &str = "daosign";
pub const DOMAIN_VERSION: &str = "0.1.0";
pub const DOMAIN_CHAIN_ID: u64 = 0;
pub const DOMAIN_VERIFYING_CONTRACT: Address = [0u8; 20];

static EIP712_DOMAIN_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256(b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")
});

static SIGNER_TYPEHASH: Lazy<B256> = Lazy::new(|| keccak256(b"Signer(address addr,string metadata)"));

static PROOF_AUTHORITY_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256(
        b"ProofOfAuthority(string name,address from,string agreementCID,Signer[] signers,string app,uint256 timestamp,string metadata)Signer(address addr,string metadata)",
    )
});

static PROOF_SIGNATURE_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256(
        b"ProofOfSignature(string name,address signer,string agreementCID,string app,uint256 timestamp,string metadata)",
    )
});

static PROOF_AGREEMENT_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256(b"ProofOfAgreement(string agreementCID,string[] signatureCIDs,string app,uint256 timestamp,string metadata)")
});

/// Domain separator for this system, fixed at init and cached forever.
static DOMAIN_SEPARATOR: Lazy<B256> = Lazy::new(compute_domain_separator);

fn pad_address(addr: &Address) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(addr);
    out
}

fn pad_u64(value: u64) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

fn compute_domain_separator() -> B256 {
    let mut encoded = Vec::with_capacity(128);
    encoded.extend_from_slice(EIP712_DOMAIN_TYPEHASH.as_slice());
    encoded.extend_from_slice(keccak256(DOMAIN_NAME.as_bytes()).as_slice());
    encoded.extend_from_slice(keccak256(DOMAIN_VERSION.as_bytes()).as_slice());
    encoded.extend_from_slice(&pad_u64(DOMAIN_CHAIN_ID));
    encoded.extend_from_slice(&pad_address(&DOMAIN_VERIFYING_CONTRACT));
    keccak256(&encoded)
}

/// Returns the cached 32-byte domain separator for this registry.
pub fn domain_separator() -> B256 {
    *DOMAIN_SEPARATOR
}

fn signer_struct_hash(s: &Signer) -> B256 {
    let mut encoded = Vec::with_capacity(96);
    encoded.extend_from_slice(SIGNER_TYPEHASH.as_slice());
    encoded.extend_from_slice(&pad_address(&s.addr));
    encoded.extend_from_slice(keccak256(s.metadata.as_bytes()).as_slice());
    keccak256(&encoded)
}

/// keccak256 of the concatenation of each signer's struct hash — no length
/// prefix, no separator, matching the source's `encodePacked` pattern.
fn signers_array_hash(signers: &[Signer]) -> B256 {
    let mut encoded = Vec::with_capacity(signers.len() * 32);
    for s in signers {
        encoded.extend_from_slice(signer_struct_hash(s).as_slice());
    }
    keccak256(&encoded)
}

/// keccak256 of the concatenation of the keccak256 of each string.
fn string_array_hash(items: &[String]) -> B256 {
    let mut encoded = Vec::with_capacity(items.len() * 32);
    for item in items {
        encoded.extend_from_slice(keccak256(item.as_bytes()).as_slice());
    }
    keccak256(&encoded)
}

/// A message this registry can hash and sign, tagged by variant so
/// `struct_hash` dispatches without needing per-type trait objects.
pub enum Message<'a> {
    Authority(&'a ProofOfAuthorityMsg),
    Signature(&'a ProofOfSignatureMsg),
    Agreement(&'a ProofOfAgreementMsg),
}

impl<'a> Message<'a> {
    /// `abi.encode(TYPEHASH, field0, field1, ...)` followed by keccak256 of
    /// the whole buffer, per the field order declared in each type string.
    pub fn struct_hash(&self) -> B256 {
        match self {
            Message::Authority(m) => {
                let mut encoded = Vec::with_capacity(32 * 7);
                encoded.extend_from_slice(PROOF_AUTHORITY_TYPEHASH.as_slice());
                encoded.extend_from_slice(keccak256(m.name.as_bytes()).as_slice());
                encoded.extend_from_slice(&pad_address(&m.from));
                encoded.extend_from_slice(keccak256(m.agreement_cid.as_bytes()).as_slice());
                encoded.extend_from_slice(signers_array_hash(&m.signers).as_slice());
                encoded.extend_from_slice(keccak256(m.app.as_bytes()).as_slice());
                encoded.extend_from_slice(&pad_u64(m.timestamp));
                encoded.extend_from_slice(keccak256(m.metadata.as_bytes()).as_slice());
                keccak256(&encoded)
            }
            Message::Signature(m) => {
                let mut encoded = Vec::with_capacity(32 * 6);
                encoded.extend_from_slice(PROOF_SIGNATURE_TYPEHASH.as_slice());
                encoded.extend_from_slice(keccak256(m.name.as_bytes()).as_slice());
                encoded.extend_from_slice(&pad_address(&m.signer));
                encoded.extend_from_slice(keccak256(m.agreement_cid.as_bytes()).as_slice());
                encoded.extend_from_slice(keccak256(m.app.as_bytes()).as_slice());
                encoded.extend_from_slice(&pad_u64(m.timestamp));
                encoded.extend_from_slice(keccak256(m.metadata.as_bytes()).as_slice());
                keccak256(&encoded)
            }
            Message::Agreement(m) => {
                let mut encoded = Vec::with_capacity(32 * 5);
                encoded.extend_from_slice(PROOF_AGREEMENT_TYPEHASH.as_slice());
                encoded.extend_from_slice(keccak256(m.agreement_cid.as_bytes()).as_slice());
                encoded.extend_from_slice(string_array_hash(&m.signature_cids).as_slice());
                encoded.extend_from_slice(keccak256(m.app.as_bytes()).as_slice());
                encoded.extend_from_slice(&pad_u64(m.timestamp));
                encoded.extend_from_slice(keccak256(m.metadata.as_bytes()).as_slice());
                keccak256(&encoded)
            }
        }
    }

    /// `keccak256(0x19 0x01 || domainSeparator || structHash(message))`.
    pub fn digest(&self) -> B256 {
        let mut buf = Vec::with_capacity(66);
        buf.push(0x19);
        buf.push(0x01);
        buf.extend_from_slice(domain_separator().as_slice());
        buf.extend_from_slice(self.struct_hash().as_slice());
        keccak256(&buf)
    }
}
