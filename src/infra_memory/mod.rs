mod film_repo_memory;
mod table;
mod user_repo_memory;

pub use film_repo_memory::*;
pub use table::*;
pub use user_repo_memory::*;

mod repo_tx_memory;

pub use repo_tx_memory::*;
