mod auth;
mod health_check;
mod jokes;

pub use auth::{json_error_handler, login, register};
pub use health_check::health_check;
pub use jokes::{get_jokes, Joke};
