/// Middleware module
///
/// Token verification for protected routes.

mod token_guard;

pub use token_guard::TokenGuard;
