//! Remember-me token lifecycle.

use crate::error::{Result, StoreError};
use crate::model::RememberToken;

/// Token lifetime: 30 days.
pub const REMEMBER_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Raw entropy per token; hex-encoded for storage and cookie transport.
const TOKEN_BYTES: usize = 32;

/// Mint a fresh token expiring `REMEMBER_TOKEN_TTL_SECS` after `now_epoch`.
pub fn mint(now_epoch: i64) -> Result<RememberToken> {
    let mut buf = [0u8; TOKEN_BYTES];
    getrandom::getrandom(&mut buf)
        .map_err(|err| StoreError::Crypto(format!("token entropy unavailable: {}", err)))?;
    Ok(RememberToken {
        token: hex::encode(buf),
        expires_at: now_epoch + REMEMBER_TOKEN_TTL_SECS,
    })
}
