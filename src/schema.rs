//! Static EIP-712 type descriptors returned alongside stored messages from
//! `get*`. Values are fixed at init; field order matches the type strings
//! in [`crate::eip712`].

use std::collections::BTreeMap;

use serde::Serialize;

pub const PRIMARY_TYPE_AUTHORITY: &str = "ProofOfAuthority";
pub const PRIMARY_TYPE_SIGNATURE: &str = "ProofOfSignature";
pub const PRIMARY_TYPE_AGREEMENT: &str = "ProofOfAgreement";

#[derive(Debug, Clone, Serialize)]
pub struct FieldType {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
}

const fn field(name: &'static str, ty: &'static str) -> FieldType {
    FieldType { name, ty }
}

pub fn eip712_domain_fields() -> Vec<FieldType> {
    vec![
        field("name", "string"),
        field("version", "string"),
        field("chainId", "uint256"),
        field("verifyingContract", "address"),
    ]
}

pub fn signer_fields() -> Vec<FieldType> {
    vec![field("addr", "address"), field("metadata", "string")]
}

pub fn proof_of_authority_fields() -> Vec<FieldType> {
    vec![
        field("name", "string"),
        field("from", "address"),
        field("agreementCID", "string"),
        field("signers", "Signer[]"),
        field("app", "string"),
        field("timestamp", "uint256"),
        field("metadata", "string"),
    ]
}

pub fn proof_of_signature_fields() -> Vec<FieldType> {
    vec![
        field("name", "string"),
        field("signer", "address"),
        field("agreementCID", "string"),
        field("app", "string"),
        field("timestamp", "uint256"),
        field("metadata", "string"),
    ]
}

pub fn proof_of_agreement_fields() -> Vec<FieldType> {
    vec![
        field("agreementCID", "string"),
        field("signatureCIDs", "string[]"),
        field("app", "string"),
        field("timestamp", "uint256"),
        field("metadata", "string"),
    ]
}

/// The `types` object returned by `get*`: `EIP712Domain` plus the primary
/// type's own table, with `Signer` included only where it is actually
/// referenced (Proof-of-Authority).
pub fn types_for(primary_type: &str) -> BTreeMap<&'static str, Vec<FieldType>> {
    let mut types = BTreeMap::new();
    types.insert("EIP712Domain", eip712_domain_fields());
    match primary_type {
        PRIMARY_TYPE_AUTHORITY => {
            types.insert("Signer", signer_fields());
            types.insert("ProofOfAuthority", proof_of_authority_fields());
        }
        PRIMARY_TYPE_SIGNATURE => {
            types.insert("ProofOfSignature", proof_of_signature_fields());
        }
        PRIMARY_TYPE_AGREEMENT => {
            types.insert("ProofOfAgreement", proof_of_agreement_fields());
        }
        other => unreachable!("unknown primary type: {other}"),
    }
    types
}
