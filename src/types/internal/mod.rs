pub mod claims;
pub mod permissions;
pub mod principal;

pub use claims::{AdminClaims, UserClaims};
pub use principal::{Principal, UserPrincipal, ADMIN_SURROGATE_USER_ID};
