mod catalog_error;
mod film_service;
mod user_service;

pub use catalog_error::*;
pub use film_service::*;
pub use user_service::*;
