mod errors;
mod form;
mod password;
mod storage;
mod types;

pub use errors::UserError;
pub use form::{LoginForm, SignupForm};
pub use types::User;

pub(crate) use form::{INVALID_LOGIN, USERNAME_TAKEN};
pub(crate) use password::{hash_password, verify_password};
pub(crate) use storage::UserStore;
