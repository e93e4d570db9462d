use subtle::ConstantTimeEq;

use super::types::CsrfToken;

/// Compare a submitted token with the session's in constant time.
pub fn verify_csrf_token(expected: &CsrfToken, submitted: &str) -> bool {
    submitted
        .as_bytes()
        .ct_eq(expected.as_str().as_bytes())
        .into()
}
