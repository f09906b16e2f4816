//! End-to-end coverage over the full HTTP surface, exercising the
//! Proof-of-Authority -> Proof-of-Signature -> Proof-of-Agreement chain
//! the way an external client would: sign a real digest, POST the JSON
//! envelope, GET it back.

use std::sync::Arc;

use axum_test::TestServer;
use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde_json::json;

use daosign_registry::api::{AppState, router};
use daosign_registry::config::Config;
use daosign_registry::eip712::Message;
use daosign_registry::message::{
    Address, Bytes65Sig, ProofOfAgreementMsg, ProofOfAuthorityMsg, ProofOfSignatureMsg, Signer,
    APP_NAME, NAME_PROOF_OF_AUTHORITY, NAME_PROOF_OF_SIGNATURE,
};

fn test_server() -> TestServer {
    let state = Arc::new(AppState::new(Config { port: 0 }).unwrap());
    TestServer::new(router(state)).unwrap()
}

fn address_of(key: &SigningKey) -> Address {
    let point = VerifyingKey::from(key).to_encoded_point(false);
    let hash = alloy_primitives::keccak256(&point.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    addr
}

fn sign(digest: alloy_primitives::B256, key: &SigningKey) -> Bytes65Sig {
    let (signature, recovery_id) = key.sign_prehash_recoverable(digest.as_slice()).unwrap();
    let mut out = [0u8; 65];
    out[..32].copy_from_slice(&signature.r().to_bytes());
    out[32..64].copy_from_slice(&signature.s().to_bytes());
    out[64] = recovery_id.to_byte() + 27;
    out
}

fn hex_sig(sig: &Bytes65Sig) -> String {
    format!("0x{}", hex::encode(sig))
}

fn hex_addr(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

fn cid(tag: &str) -> String {
    format!("{:0<46}", tag)
}

#[tokio::test]
async fn health_reports_zero_counts_on_a_fresh_registry() {
    let server = test_server();
    let response = server.get("/api/v1/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "status": "ok",
        "proof_of_authority_count": 0,
        "proof_of_signature_count": 0,
        "proof_of_agreement_count": 0,
    }));
}

#[tokio::test]
async fn stores_and_retrieves_a_proof_of_authority() {
    let server = test_server();
    let key = SigningKey::random(&mut OsRng);
    let from = address_of(&key);

    let message = ProofOfAuthorityMsg {
        name: NAME_PROOF_OF_AUTHORITY.to_string(),
        from,
        agreement_cid: cid("agreement file cid"),
        signers: vec![Signer { addr: from, metadata: "some metadata".to_string() }],
        app: APP_NAME.to_string(),
        timestamp: 1_700_000_000,
        metadata: "proof metadata".to_string(),
    };
    let digest = Message::Authority(&message).digest();
    let signature = sign(digest, &key);
    let proof_cid = cid("ProofOfAuthority proof cid");

    let body = json!({
        "message": {
            "name": message.name,
            "from": hex_addr(&from),
            "agreementCID": message.agreement_cid,
            "signers": [{"addr": hex_addr(&from), "metadata": "some metadata"}],
            "app": message.app,
            "timestamp": message.timestamp,
            "metadata": message.metadata,
        },
        "signature": hex_sig(&signature),
        "proofCID": proof_cid,
    });

    let post = server.post("/api/v1/proof-of-authority").json(&body).await;
    post.assert_status(axum::http::StatusCode::CREATED);

    let get = server
        .get(&format!("/api/v1/proof-of-authority/{proof_cid}"))
        .await;
    get.assert_status_ok();
    let got: serde_json::Value = get.json();
    assert_eq!(got["primaryType"], "ProofOfAuthority");
    assert_eq!(got["proofCID"], proof_cid);
    assert_eq!(got["message"]["from"], hex_addr(&from));
    assert!(got["types"].get("Signer").is_some());
}

#[tokio::test]
async fn rejects_a_proof_of_authority_signed_by_the_wrong_key() {
    let server = test_server();
    let key = SigningKey::random(&mut OsRng);
    let other_key = SigningKey::random(&mut OsRng);
    let from = address_of(&key);

    let message = ProofOfAuthorityMsg {
        name: NAME_PROOF_OF_AUTHORITY.to_string(),
        from,
        agreement_cid: cid("agreement"),
        signers: vec![Signer { addr: from, metadata: "m".to_string() }],
        app: APP_NAME.to_string(),
        timestamp: 1,
        metadata: String::new(),
    };
    let digest = Message::Authority(&message).digest();
    let signature = sign(digest, &other_key);

    let body = json!({
        "message": {
            "name": message.name,
            "from": hex_addr(&from),
            "agreementCID": message.agreement_cid,
            "signers": [{"addr": hex_addr(&from), "metadata": "m"}],
            "app": message.app,
            "timestamp": message.timestamp,
            "metadata": message.metadata,
        },
        "signature": hex_sig(&signature),
        "proofCID": cid("poa"),
    });

    let post = server.post("/api/v1/proof-of-authority").json(&body).await;
    post.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_cid_returns_404() {
    let server = test_server();
    let response = server
        .get(&format!("/api/v1/proof-of-authority/{}", cid("missing")))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_authority_signature_agreement_chain_over_http() {
    let server = test_server();
    let key = SigningKey::random(&mut OsRng);
    let from = address_of(&key);
    let agreement_cid = cid("agreement file cid");

    let authority_msg = ProofOfAuthorityMsg {
        name: NAME_PROOF_OF_AUTHORITY.to_string(),
        from,
        agreement_cid: agreement_cid.clone(),
        signers: vec![Signer { addr: from, metadata: "some metadata".to_string() }],
        app: APP_NAME.to_string(),
        timestamp: 1,
        metadata: "proof metadata".to_string(),
    };
    let authority_cid = cid("ProofOfAuthority proof cid");
    let authority_sig = sign(Message::Authority(&authority_msg).digest(), &key);

    server
        .post("/api/v1/proof-of-authority")
        .json(&json!({
            "message": {
                "name": authority_msg.name,
                "from": hex_addr(&from),
                "agreementCID": authority_msg.agreement_cid,
                "signers": [{"addr": hex_addr(&from), "metadata": "some metadata"}],
                "app": authority_msg.app,
                "timestamp": authority_msg.timestamp,
                "metadata": authority_msg.metadata,
            },
            "signature": hex_sig(&authority_sig),
            "proofCID": authority_cid,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let signature_msg = ProofOfSignatureMsg {
        name: NAME_PROOF_OF_SIGNATURE.to_string(),
        signer: from,
        agreement_cid: authority_cid.clone(),
        app: APP_NAME.to_string(),
        timestamp: 2,
        metadata: String::new(),
    };
    let signature_cid = cid("ProofOfSignature proof cid");
    let signature_sig = sign(Message::Signature(&signature_msg).digest(), &key);

    server
        .post("/api/v1/proof-of-signature")
        .json(&json!({
            "message": {
                "name": signature_msg.name,
                "signer": hex_addr(&from),
                "agreementCID": signature_msg.agreement_cid,
                "app": signature_msg.app,
                "timestamp": signature_msg.timestamp,
                "metadata": signature_msg.metadata,
            },
            "signature": hex_sig(&signature_sig),
            "proofCID": signature_cid,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let agreement_msg = ProofOfAgreementMsg {
        agreement_cid: authority_cid,
        signature_cids: vec![signature_cid],
        app: APP_NAME.to_string(),
        timestamp: 3,
        metadata: String::new(),
    };
    let agreement_cid = cid("ProofOfAgreement proof cid");

    server
        .post("/api/v1/proof-of-agreement")
        .json(&json!({
            "message": {
                "agreementCID": agreement_msg.agreement_cid,
                "signatureCIDs": agreement_msg.signature_cids,
                "app": agreement_msg.app,
                "timestamp": agreement_msg.timestamp,
                "metadata": agreement_msg.metadata,
            },
            "signature": hex_sig(&[0u8; 65]),
            "proofCID": agreement_cid,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let get = server
        .get(&format!("/api/v1/proof-of-agreement/{agreement_cid}"))
        .await;
    get.assert_status_ok();

    let health = server.get("/api/v1/health").await;
    health.assert_json(&json!({
        "status": "ok",
        "proof_of_authority_count": 1,
        "proof_of_signature_count": 1,
        "proof_of_agreement_count": 1,
    }));
}

#[tokio::test]
async fn agreement_cardinality_mismatch_is_rejected_over_http() {
    let server = test_server();
    let key = SigningKey::random(&mut OsRng);
    let from = address_of(&key);

    let authority_msg = ProofOfAuthorityMsg {
        name: NAME_PROOF_OF_AUTHORITY.to_string(),
        from,
        agreement_cid: cid("agreement"),
        signers: vec![Signer { addr: from, metadata: "m".to_string() }],
        app: APP_NAME.to_string(),
        timestamp: 1,
        metadata: String::new(),
    };
    let authority_cid = cid("poa");
    let authority_sig = sign(Message::Authority(&authority_msg).digest(), &key);

    server
        .post("/api/v1/proof-of-authority")
        .json(&json!({
            "message": {
                "name": authority_msg.name,
                "from": hex_addr(&from),
                "agreementCID": authority_msg.agreement_cid,
                "signers": [{"addr": hex_addr(&from), "metadata": "m"}],
                "app": authority_msg.app,
                "timestamp": authority_msg.timestamp,
                "metadata": authority_msg.metadata,
            },
            "signature": hex_sig(&authority_sig),
            "proofCID": authority_cid,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let agreement_msg = ProofOfAgreementMsg {
        agreement_cid: authority_cid,
        signature_cids: vec![],
        app: APP_NAME.to_string(),
        timestamp: 1,
        metadata: String::new(),
    };

    let response = server
        .post("/api/v1/proof-of-agreement")
        .json(&json!({
            "message": {
                "agreementCID": agreement_msg.agreement_cid,
                "signatureCIDs": agreement_msg.signature_cids,
                "app": agreement_msg.app,
                "timestamp": agreement_msg.timestamp,
                "metadata": agreement_msg.metadata,
            },
            "signature": hex_sig(&[0u8; 65]),
            "proofCID": cid("poagr"),
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid Proofs-of-Signatures length");
}
