//! Ownership-scoped access control
//!
//! A resource (note, comment) records the identity that created it. Only that
//! identity may open, edit or delete it. Any other authenticated identity is told
//! the resource does not exist, so the answer never confirms that someone else's
//! resource is there. Anonymous requesters are sent to the login page with a
//! continuation back to the URL they asked for.
//!
//! The guard is a set of pure functions over [`Identity`], the stored owner and
//! the [`Operation`]; it knows nothing about storage or routing.

mod policy;
mod types;

pub use policy::{authorize, filter_owned, login_redirect_location, require_login, stamp_owner};
pub use types::{Decision, Identity, Operation, Owned, Stamped, UserId};
