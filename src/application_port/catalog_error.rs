use crate::domain_model::{FilmId, UserId};
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn film_not_found(id: FilmId) -> Self {
        CatalogError::NotFound(format!("Фильм с id {id} не найден"))
    }

    pub fn user_not_found(id: UserId) -> Self {
        CatalogError::NotFound(format!("Пользователь с id {id} не найден"))
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Store(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Store(err.to_string())
    }
}
