mod callback;
mod errors;
mod set_cookie;

pub use callback::{CallbackOutcome, handle_callback};
pub use errors::RelayError;
pub use set_cookie::extract_cookie_value;
