//! Gateway event payloads and signature verification.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Event type emitted when an out-of-band payment settles.
pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment.succeeded";
/// Event type emitted when an out-of-band payment is declined.
pub const EVENT_PAYMENT_FAILED: &str = "payment.failed";

/// The parsed body of a gateway callback.
///
/// Parsed only after the signature over the raw bytes has verified.
/// `event_type` is an open set: types this core does not know are
/// acknowledged and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub event_type: String,
    /// Gateway-assigned payment identifier; the idempotency key.
    pub payment_id: String,
    /// The order this settlement refers to, e.g. `order_12`.
    pub order_ref: String,
    pub amount_cents: u64,
}

/// HMAC-SHA256 verifier for gateway payloads.
///
/// The gateway signs the raw request body with a shared secret and sends
/// the hex-encoded tag alongside it. Verification is constant-time and
/// happens before the payload is even parsed.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Whether `signature_hex` is a valid tag over `payload`.
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> bool {
        let Ok(signature) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return false;
        };
        mac.update(payload);
        mac.verify_slice(&signature).is_ok()
    }

    /// Hex tag over `payload`, as the gateway would compute it. Used by
    /// tests and trusted event producers.
    pub fn sign(&self, payload: &[u8]) -> String {
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            // HMAC accepts keys of any length; this arm is unreachable.
            return String::new();
        };
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret.
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let verifier = SignatureVerifier::new(b"topsecret");
        let payload = br#"{"event_type":"payment.succeeded"}"#;
        let tag = verifier.sign(payload);
        assert!(verifier.verify(payload, &tag));
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let verifier = SignatureVerifier::new(b"topsecret");
        let tag = verifier.sign(b"amount=100");
        assert!(!verifier.verify(b"amount=999", &tag));
    }

    #[test]
    fn test_rejects_wrong_key_and_garbage() {
        let verifier = SignatureVerifier::new(b"topsecret");
        let other = SignatureVerifier::new(b"other-key");
        let payload = b"hello";
        assert!(!verifier.verify(payload, &other.sign(payload)));
        assert!(!verifier.verify(payload, "not-hex"));
        assert!(!verifier.verify(payload, ""));
    }
}
