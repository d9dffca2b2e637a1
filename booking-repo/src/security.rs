//! Security utilities for payment signatures and verification tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use booking_types::PaymentClaim;
use booking_types::domain::payment::signed_payload;

type HmacSha256 = Hmac<Sha256>;

fn hmac_hex(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Computes the gateway's payment signature:
/// lowercase hex of `HMAC-SHA256(secret, order_id + "|" + payment_id)`.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    hmac_hex(secret, signed_payload(order_id, payment_id).as_bytes())
}

/// Verifies a payment claim using constant-time comparison.
pub fn verify_payment_signature(claim: &PaymentClaim, secret: &str) -> bool {
    let expected = hmac_hex(secret, claim.signed_payload().as_bytes());
    expected.as_bytes().ct_eq(claim.signature.as_bytes()).into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Verification tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Why a verification token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("verification token is malformed")]
    Malformed,

    #[error("verification token has expired")]
    Expired,

    #[error("verification token does not match this payment")]
    Mismatch,
}

fn token_mac(order_id: &str, payment_id: &str, expires_at: i64, secret: &str) -> String {
    // The "token" prefix keeps these MACs disjoint from gateway signatures.
    let payload = format!("token|{}|{}|{}", order_id, payment_id, expires_at);
    hmac_hex(secret, payload.as_bytes())
}

/// Issues a token proving `order_id`/`payment_id` passed verification.
///
/// Format: `<expires_at unix seconds>.<hex mac>`.
pub fn issue_verification_token(
    order_id: &str,
    payment_id: &str,
    secret: &str,
    expires_at: i64,
) -> String {
    format!(
        "{}.{}",
        expires_at,
        token_mac(order_id, payment_id, expires_at, secret)
    )
}

/// Checks a token issued by [`issue_verification_token`] at time `now`.
pub fn check_verification_token(
    token: &str,
    order_id: &str,
    payment_id: &str,
    secret: &str,
    now: i64,
) -> Result<(), TokenError> {
    let (expires_at, mac) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let expires_at: i64 = expires_at.parse().map_err(|_| TokenError::Malformed)?;

    let expected = token_mac(order_id, payment_id, expires_at, secret);
    if !bool::from(expected.as_bytes().ct_eq(mac.as_bytes())) {
        return Err(TokenError::Mismatch);
    }
    if now > expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "my_secret_key";

    fn claim(signature: String) -> PaymentClaim {
        PaymentClaim::new(
            Some("order_123".into()),
            Some("pay_456".into()),
            Some(signature),
        )
        .unwrap()
    }

    #[test]
    fn test_signature_known_vector() {
        // HMAC-SHA256("my_secret_key", "order_123|pay_456")
        let signature = sign_payment("order_123", "pay_456", SECRET);
        assert_eq!(
            signature,
            "bbaaa505e4863940150270d08c3dc5ad88f6719f7d190f393df70567b70d7019"
        );
        assert_eq!(signature, sign_payment("order_123", "pay_456", SECRET));
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let base = sign_payment("order_123", "pay_456", SECRET);
        assert_ne!(base, sign_payment("order_124", "pay_456", SECRET));
        assert_ne!(base, sign_payment("order_123", "pay_457", SECRET));
        assert_ne!(base, sign_payment("order_123", "pay_456", "other_secret"));
    }

    #[test]
    fn test_verify_payment_signature() {
        let good = sign_payment("order_123", "pay_456", SECRET);
        assert!(verify_payment_signature(&claim(good.clone()), SECRET));
        assert!(!verify_payment_signature(&claim(good), "wrong_secret"));
    }

    #[test]
    fn test_single_flipped_char_fails() {
        let mut sig: Vec<char> = sign_payment("order_123", "pay_456", SECRET).chars().collect();
        sig[10] = if sig[10] == 'a' { 'b' } else { 'a' };
        let tampered: String = sig.into_iter().collect();

        assert!(!verify_payment_signature(&claim(tampered), SECRET));
    }

    #[test]
    fn test_uppercase_signature_is_rejected() {
        let upper = sign_payment("order_123", "pay_456", SECRET).to_uppercase();
        assert!(!verify_payment_signature(&claim(upper), SECRET));
    }

    #[test]
    fn test_token_roundtrip_and_expiry() {
        let token = issue_verification_token("order_123", "pay_456", SECRET, 1_000);

        assert_eq!(
            check_verification_token(&token, "order_123", "pay_456", SECRET, 999),
            Ok(())
        );
        assert_eq!(
            check_verification_token(&token, "order_123", "pay_456", SECRET, 1_001),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_bound_to_payment() {
        let token = issue_verification_token("order_123", "pay_456", SECRET, 1_000);

        assert_eq!(
            check_verification_token(&token, "order_123", "pay_999", SECRET, 0),
            Err(TokenError::Mismatch)
        );
        assert_eq!(
            check_verification_token(&token, "order_123", "pay_456", "other", 0),
            Err(TokenError::Mismatch)
        );
    }

    #[test]
    fn test_token_expiry_cannot_be_extended() {
        let token = issue_verification_token("order_123", "pay_456", SECRET, 1_000);
        let (_, mac) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", 9_999, mac);

        assert_eq!(
            check_verification_token(&forged, "order_123", "pay_456", SECRET, 2_000),
            Err(TokenError::Mismatch)
        );
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(
            check_verification_token("garbage", "o", "p", SECRET, 0),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            check_verification_token("soon.abcdef", "o", "p", SECRET, 0),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_payment_signature_is_not_a_token() {
        let signature = sign_payment("order_123", "pay_456", SECRET);
        let token = format!("{}.{}", i64::MAX, signature);
        assert!(check_verification_token(&token, "order_123", "pay_456", SECRET, 0).is_err());
    }
}
