//! secp256k1 / Ethereum-style signature recovery.

use alloy_primitives::{keccak256, B256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use k256::elliptic_curve::scalar::IsHigh;
use thiserror::Error;

use crate::message::{Address, Bytes65Sig, ZERO_ADDRESS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoverError {
    #[error("invalid v value in signature")]
    InvalidV,
    #[error("signature s value is malleable (> secp256k1_n/2)")]
    HighS,
    #[error("malformed signature")]
    Malformed,
    #[error("recovered the zero address")]
    ZeroAddress,
}

/// Recovers the signer's 20-byte address from a digest and a 65-byte
/// signature. Accepts both `v` encodings (27/28 and 0/1) by normalizing
/// `v < 27` to `v += 27`. Rejects high-s signatures (malleability) and a
/// recovered zero address.
pub fn recover(digest: &B256, sig: &Bytes65Sig) -> Result<Address, RecoverError> {
    let mut v = sig[64];
    if v < 27 {
        v += 27;
    }
    if v != 27 && v != 28 {
        return Err(RecoverError::InvalidV);
    }

    let signature = EcdsaSignature::from_slice(&sig[..64]).map_err(|_| RecoverError::Malformed)?;
    if bool::from(signature.s().is_high()) {
        return Err(RecoverError::HighS);
    }

    let recovery_id = RecoveryId::from_byte(v - 27).ok_or(RecoverError::InvalidV)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        .map_err(|_| RecoverError::Malformed)?;

    let address = public_key_to_address(&verifying_key);
    if address == ZERO_ADDRESS {
        return Err(RecoverError::ZeroAddress);
    }
    Ok(address)
}

fn public_key_to_address(key: &VerifyingKey) -> Address {
    let uncompressed = key.to_encoded_point(false);
    let hash = keccak256(&uncompressed.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    addr
}
