mod film;
mod user;

pub use film::*;
pub use user::*;
