mod film_repo;
mod store_error;
mod user_repo;

mod repo_tx;

pub use film_repo::*;
pub use store_error::*;
pub use user_repo::*;

pub use repo_tx::*;
