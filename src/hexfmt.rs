//! `0x`-prefixed hex (de)serialization for the fixed-size byte arrays used
//! on the wire (addresses, signatures). Mirrors the `hex::encode`/
//! `hex::decode` pairs scattered through the teacher's `config.rs` and
//! `attestation.rs`, collected here so every message field goes through
//! the same codec.

use serde::{Deserialize, Deserializer, Serializer};

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let bytes = hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| format!("invalid hex: {e}"))?;
    if bytes.len() != N {
        return Err(format!("expected {N} bytes, got {}", bytes.len()));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

pub mod address {
    use super::*;

    pub fn serialize<S: Serializer>(addr: &[u8; 20], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format!("0x{}", hex::encode(addr)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 20], D::Error> {
        let s = String::deserialize(de)?;
        decode_fixed::<20>(&s).map_err(serde::de::Error::custom)
    }
}

pub mod sig65 {
    use super::*;

    pub fn serialize<S: Serializer>(sig: &[u8; 65], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format!("0x{}", hex::encode(sig)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 65], D::Error> {
        let s = String::deserialize(de)?;
        decode_fixed::<65>(&s).map_err(serde::de::Error::custom)
    }
}
