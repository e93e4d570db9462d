//! Turning guard decisions into coordination results

use crate::guard::{Decision, Identity, Operation, Owned, UserId, authorize, require_login};

use super::errors::CoordinationError;

/// Map a denial onto the error the HTTP layer knows how to answer.
pub(super) fn deny(
    decision: Decision,
    resource_type: &str,
    resource_id: &str,
) -> CoordinationError {
    match decision {
        Decision::DenyRedirectToLogin { next } => CoordinationError::LoginRequired { next }.log(),
        Decision::Allow | Decision::DenyNotFound => {
            CoordinationError::not_found(resource_type, resource_id).log()
        }
    }
}

/// The requester's id, or `LoginRequired` carrying `next`.
pub(super) fn ensure_logged_in<'a>(
    requester: &'a Identity,
    next: &str,
) -> Result<&'a UserId, CoordinationError> {
    require_login(requester, next).map_err(|decision| deny(decision, "", ""))
}

/// Let `resource` through only if `requester` owns it.
///
/// A resource that does not exist and one owned by somebody else produce the
/// same `ResourceNotFound`.
pub(super) fn ensure_owner<R: Owned>(
    requester: &Identity,
    resource: Option<R>,
    operation: Operation,
    next: &str,
    resource_type: &str,
    resource_id: &str,
) -> Result<R, CoordinationError> {
    let resource = match resource {
        Some(resource) => resource,
        // Anonymous requesters learn nothing either; they are sent to log in first.
        None => {
            ensure_logged_in(requester, next)?;
            return Err(CoordinationError::not_found(resource_type, resource_id).log());
        }
    };

    match authorize(requester, resource.owner(), operation, next) {
        Decision::Allow => Ok(resource),
        denied => Err(deny(denied, resource_type, resource_id)),
    }
}
