//! Password hashing in the `pbkdf2_sha256$<iterations>$<salt>$<hash>` format

use std::num::NonZeroU32;

use ring::pbkdf2;

use crate::config::PASSWORD_HASH_ITERATIONS;
use crate::utils::{UtilError, base64url_decode, base64url_encode, gen_random_bytes};

const ALGORITHM_TAG: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub(crate) fn hash_password(password: &str) -> Result<String, UtilError> {
    hash_password_with(password, *PASSWORD_HASH_ITERATIONS)
}

fn hash_password_with(password: &str, iterations: u32) -> Result<String, UtilError> {
    let rounds = NonZeroU32::new(iterations)
        .ok_or_else(|| UtilError::Crypto("Iteration count must be positive".to_string()))?;
    let salt = gen_random_bytes(SALT_LEN)?;
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        rounds,
        &salt,
        password.as_bytes(),
        &mut hash,
    );
    Ok(format!(
        "{ALGORITHM_TAG}${iterations}${}${}",
        base64url_encode(&salt),
        base64url_encode(&hash)
    ))
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub(crate) fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(ALGORITHM_TAG), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        tracing::warn!("Stored password hash has an unexpected format");
        return false;
    };

    let Some(rounds) = iterations.parse().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (base64url_decode(salt), base64url_decode(hash)) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        rounds,
        &salt,
        password.as_bytes(),
        &hash,
    )
    .is_ok()
}
