pub mod gate;
pub mod response;

pub use gate::{decide, require_session, GateDecision};
pub use response::{found, found_with_cookie, ApiResponse};
