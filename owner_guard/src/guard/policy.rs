use crate::config::LOGIN_URL;

use super::types::{Decision, Identity, Operation, Owned, Stamped, UserId};

/// Decide whether `requester` may perform `operation` on a resource owned by `owner`.
///
/// `next` is the URL the requester asked for; anonymous requesters are sent to
/// log in and then back there.
pub fn authorize(
    requester: &Identity,
    owner: &UserId,
    operation: Operation,
    next: &str,
) -> Decision {
    let decision = match requester {
        Identity::Anonymous => Decision::DenyRedirectToLogin {
            next: next.to_string(),
        },
        Identity::User(id) if id == owner => Decision::Allow,
        Identity::User(_) => Decision::DenyNotFound,
    };

    tracing::debug!(
        requester = ?requester.user_id(),
        %owner,
        %operation,
        ?decision,
        "Ownership check"
    );
    decision
}

/// Gate for operations that have no single owner to compare against
/// (listing, the creation form, the success page).
pub fn require_login<'a>(requester: &'a Identity, next: &str) -> Result<&'a UserId, Decision> {
    requester.user_id().ok_or_else(|| {
        tracing::debug!(next, "Anonymous requester sent to login");
        Decision::DenyRedirectToLogin {
            next: next.to_string(),
        }
    })
}

/// Keep only the resources owned by `requester`. Anonymous requesters own nothing.
pub fn filter_owned<R: Owned>(
    requester: &Identity,
    resources: impl IntoIterator<Item = R>,
) -> Vec<R> {
    match requester.user_id() {
        Some(id) => resources
            .into_iter()
            .filter(|resource| resource.owner() == id)
            .collect(),
        None => Vec::new(),
    }
}

/// Attach the requester as owner of a resource about to be created.
///
/// The owner comes from the requester only; the draft has no way to name one.
pub fn stamp_owner<T>(requester: &Identity, draft: T, next: &str) -> Result<Stamped<T>, Decision> {
    let owner = require_login(requester, next)?;
    Ok(Stamped::new(owner.clone(), draft))
}

/// Location of the login page carrying `next` as continuation.
///
/// The continuation is percent-encoded segment by segment so that `/` stays
/// readable: `/auth/login/?next=/edit/slug/`.
pub fn login_redirect_location(next: &str) -> String {
    let encoded = next
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}?next={}", LOGIN_URL.as_str(), encoded)
}
