use crate::application_port::CatalogError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    async fn add_film(&self, film: Film) -> Result<Film, CatalogError>;
    async fn update_film(&self, film: Film) -> Result<Film, CatalogError>;
    async fn get_all_films(&self) -> Result<Vec<Film>, CatalogError>;
    async fn get_film_by_id(&self, id: FilmId) -> Result<Film, CatalogError>;
    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError>;
    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError>;
    /// Most liked films first; `count` must be positive.
    async fn get_popular_films(&self, count: i64) -> Result<Vec<Film>, CatalogError>;
}
