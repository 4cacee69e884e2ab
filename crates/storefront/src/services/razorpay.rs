//! Razorpay payment gateway client.
//!
//! Checkout creates a gateway order for the cart total; the client later posts
//! back `(order_id, payment_id, signature)` and we verify the signature is
//! HMAC-SHA256 of `"<order_id>|<payment_id>"` under the key secret before
//! marking anything paid. Amounts cross the wire in paise.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::config::RazorpayConfig;

const API_BASE: &str = "https://api.razorpay.com/v1";

type HmacSha256 = Hmac<Sha256>;

/// Errors from the payment gateway.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// The HTTP request itself failed.
    #[error("Razorpay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Razorpay returned a non-success status.
    #[error("Razorpay API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The order total cannot be expressed as a positive amount in paise.
    #[error("order total {0} is not chargeable")]
    UnchargeableAmount(Decimal),
}

/// A gateway order as returned by order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
}

#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Client for the Razorpay orders API.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: SecretString,
    currency: String,
}

impl RazorpayClient {
    /// Build a client from configuration.
    #[must_use]
    pub fn new(config: &RazorpayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            currency: config.currency.clone(),
        }
    }

    /// Create a gateway order for `total` (in rupees).
    ///
    /// `receipt` is our own reference (the cart being checked out), echoed
    /// back in gateway dashboards and webhooks for reconciliation.
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::UnchargeableAmount` if the total doesn't
    /// convert to a positive whole number of paise, `RazorpayError::Api` for
    /// gateway rejections and `RazorpayError::Http` for transport failures.
    pub async fn create_order(
        &self,
        total: Decimal,
        receipt: &str,
    ) -> Result<RazorpayOrder, RazorpayError> {
        let amount = to_paise(total).ok_or(RazorpayError::UnchargeableAmount(total))?;

        let response = self
            .http
            .post(format!("{API_BASE}/orders"))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&CreateOrderRequest {
                amount,
                currency: &self.currency,
                receipt,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Verify a payment callback signature.
    ///
    /// Returns `true` only if `signature` is the hex HMAC-SHA256 of
    /// `"<order_id>|<payment_id>"` under the key secret. Comparison is
    /// constant-time.
    #[must_use]
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        let mut mac = HmacSha256::new_from_slice(self.key_secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

/// Convert a rupee amount to a positive whole number of paise.
fn to_paise(total: Decimal) -> Option<i64> {
    if total <= Decimal::ZERO {
        return None;
    }
    (total * Decimal::ONE_HUNDRED).round_dp(0).to_i64()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(secret: &str) -> RazorpayClient {
        RazorpayClient {
            http: reqwest::Client::new(),
            key_id: "rzp_test_key".to_string(),
            key_secret: SecretString::from(secret.to_string()),
            currency: "INR".to_string(),
        }
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_to_paise() {
        assert_eq!(to_paise("1100.00".parse().unwrap()), Some(110_000));
        assert_eq!(to_paise("0.50".parse().unwrap()), Some(50));
        // Sub-paise fractions round to the nearest paisa.
        assert_eq!(to_paise("10.005".parse().unwrap()), Some(1000));
        assert_eq!(to_paise(Decimal::ZERO), None);
        assert_eq!(to_paise("-5".parse().unwrap()), None);
    }

    #[test]
    fn test_verify_signature_accepts_valid() {
        let client = client("secret-key");
        let signature = sign("secret-key", "order_abc", "pay_xyz");
        assert!(client.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn test_verify_signature_rejects_wrong_secret() {
        let client = client("secret-key");
        let signature = sign("other-secret", "order_abc", "pay_xyz");
        assert!(!client.verify_signature("order_abc", "pay_xyz", &signature));
    }

    #[test]
    fn test_verify_signature_rejects_swapped_ids() {
        let client = client("secret-key");
        let signature = sign("secret-key", "order_abc", "pay_xyz");
        assert!(!client.verify_signature("pay_xyz", "order_abc", &signature));
    }

    #[test]
    fn test_verify_signature_rejects_non_hex() {
        let client = client("secret-key");
        assert!(!client.verify_signature("order_abc", "pay_xyz", "not hex at all"));
    }
}
