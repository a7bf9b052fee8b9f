mod error;
mod handler;
mod router;

pub use error::{ApiErrorCode, ErrorBody, recover_error};
pub use router::routes;
