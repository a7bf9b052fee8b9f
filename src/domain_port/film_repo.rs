use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait FilmRepo: Send + Sync {
    /// Store a new film under a freshly assigned id. Any id on the input is ignored.
    async fn add(&self, film: Film) -> Result<Film, StoreError>;

    /// Replace the film stored under `film.id`; `NotFound` if there is none.
    async fn update(&self, film: Film) -> Result<Film, StoreError>;

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, StoreError>;

    /// All films in insertion order.
    async fn find_all(&self) -> Result<Vec<Film>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
