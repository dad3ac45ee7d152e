/// Authentication module
///
/// Password hashing, token issuance/validation and the credential service
/// that ties them to the user store.

mod claims;
mod credentials;
mod jwt;
mod password;

pub use claims::Claims;
pub use credentials::{CredentialService, Credentials, LoginResponse};
pub use jwt::issue_token;
pub use jwt::validate_token;
pub use password::hash_password;
pub use password::verify_password;
