//! RSA signature verification against the provider's signing certificate.
//!
//! The provider signs the canonical string with RSA PKCS#1 v1.5 over SHA-1.
//! Key material arrives as whatever the certificate endpoint serves: an
//! X.509 certificate PEM in practice, though bare public-key PEM forms are
//! accepted too. Any parse failure of the key or the signature is a plain
//! verification failure, never an error.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};
use tracing::warn;

/// Verify `signature_b64` over `data` with the given key material.
///
/// Returns `true` only on an exact cryptographic match.
pub fn verify(data: &str, signature_b64: &str, key_material: &str) -> bool {
    let signature = match BASE64_STANDARD.decode(signature_b64.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("signature_not_base64");
            return false;
        }
    };

    let public_key = match parse_public_key(key_material) {
        Some(key) => key,
        None => {
            warn!("signing_key_unparseable");
            return false;
        }
    };

    let digest = Sha1::digest(data.as_bytes());

    public_key
        .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
        .is_ok()
}

/// Extract an RSA public key from PEM key material.
///
/// Accepts an X.509 certificate, an SPKI public key, or a PKCS#1 RSA public
/// key. Returns `None` for anything else.
fn parse_public_key(material: &str) -> Option<RsaPublicKey> {
    if material.contains("BEGIN CERTIFICATE") {
        let (_, pem) = x509_parser::pem::parse_x509_pem(material.as_bytes()).ok()?;
        let cert = pem.parse_x509().ok()?;
        RsaPublicKey::from_public_key_der(cert.public_key().raw).ok()
    } else if material.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(material).ok()
    } else {
        RsaPublicKey::from_public_key_pem(material).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;

    fn test_keypair() -> (RsaPrivateKey, String) {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .unwrap();
        (private_key, public_pem)
    }

    fn sign(private_key: &RsaPrivateKey, data: &str) -> String {
        let digest = Sha1::digest(data.as_bytes());
        let signature = private_key
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .unwrap();
        BASE64_STANDARD.encode(signature)
    }

    #[test]
    fn test_verify_valid_signature() {
        let (private_key, public_pem) = test_keypair();
        let data = "POST\n\ntext/xml\ntoday\nx-mns-request-id:1\n/notifications";
        let signature = sign(&private_key, data);

        assert!(verify(data, &signature, &public_pem));
    }

    #[test]
    fn test_verify_rejects_tampered_data() {
        let (private_key, public_pem) = test_keypair();
        let signature = sign(&private_key, "original canonical string");

        assert!(!verify("tampered canonical string", &signature, &public_pem));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let (private_key, _) = test_keypair();
        let (_, other_public_pem) = test_keypair();
        let data = "some canonical string";
        let signature = sign(&private_key, data);

        assert!(!verify(data, &signature, &other_public_pem));
    }

    #[test]
    fn test_verify_rejects_garbage_signature() {
        let (_, public_pem) = test_keypair();

        assert!(!verify("data", "### not base64 ###", &public_pem));
        assert!(!verify("data", BASE64_STANDARD.encode(b"short").as_str(), &public_pem));
    }

    #[test]
    fn test_verify_rejects_unparseable_key_material() {
        let (private_key, _) = test_keypair();
        let signature = sign(&private_key, "data");

        assert!(!verify("data", &signature, "not a pem at all"));
        assert!(!verify(
            "data",
            &signature,
            "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n"
        ));
    }
}
