mod film_service_impl;
mod user_service_impl;
mod validation;

pub use film_service_impl::*;
pub use user_service_impl::*;
pub use validation::*;
