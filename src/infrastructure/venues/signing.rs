//! # Request Signing
//!
//! Keyed HMAC-SHA256 digests shared by the venue adapters.
//!
//! Venues differ only in what they sign and how the digest is encoded:
//! Binance wants lowercase hex over the form body, OKX wants base64 over
//! `timestamp + METHOD + path + body`. Callers must pass the exact bytes
//! they transmit.

use crate::infrastructure::venues::error::{VenueError, VenueResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn digest(secret: &str, payload: &str) -> VenueResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| VenueError::internal_error(format!("invalid HMAC key: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Returns the lowercase hex HMAC-SHA256 of `payload`.
///
/// # Errors
///
/// Returns `VenueError::InternalError` if the key is rejected by the MAC.
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> VenueResult<String> {
    digest(secret, payload).map(hex::encode)
}

/// Returns the standard base64 HMAC-SHA256 of `payload`.
///
/// # Errors
///
/// Returns `VenueError::InternalError` if the key is rejected by the MAC.
pub fn hmac_sha256_base64(secret: &str, payload: &str) -> VenueResult<String> {
    digest(secret, payload).map(|bytes| STANDARD.encode(bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Published example from the Binance REST API documentation.
    const BINANCE_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const BINANCE_PAYLOAD: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

    #[test]
    fn hex_matches_binance_documentation() {
        assert_eq!(
            hmac_sha256_hex(BINANCE_SECRET, BINANCE_PAYLOAD).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn base64_encodes_same_digest() {
        let hex = hmac_sha256_hex("secret", "payload").unwrap();
        let b64 = hmac_sha256_base64("secret", "payload").unwrap();
        assert_eq!(hex::encode(STANDARD.decode(b64).unwrap()), hex);
    }

    #[test]
    fn signature_depends_on_every_byte() {
        let a = hmac_sha256_hex("secret", "symbol=BTCUSDT&quantity=0.01").unwrap();
        let b = hmac_sha256_hex("secret", "symbol=BTCUSDT&quantity=0.010").unwrap();
        assert_ne!(a, b);
    }
}
