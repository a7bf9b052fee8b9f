use super::validation::{validate_film, validate_popular_count};
use crate::application_port::{CatalogError, FilmService};
use crate::domain_model::*;
use crate::domain_port::{FilmRepo, TxManager, UserRepo};
use crate::logger::*;
use std::sync::Arc;

pub struct RealFilmService {
    film_repo: Arc<dyn FilmRepo>,
    user_repo: Arc<dyn UserRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepo>,
        user_repo: Arc<dyn UserRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            film_repo,
            user_repo,
            tx_manager,
        }
    }

    async fn existing_film(&self, id: FilmId) -> Result<Film, CatalogError> {
        self.film_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::film_not_found(id))
    }

    // Only an absent record counts as "no such user"; store failures propagate.
    async fn user_exists(&self, id: UserId) -> Result<bool, CatalogError> {
        Ok(self.user_repo.find_by_id(id).await?.is_some())
    }

    async fn set_like(
        &self,
        film_id: FilmId,
        user_id: UserId,
        liked: bool,
    ) -> Result<(), CatalogError> {
        let tx = self.tx_manager.begin().await?;

        let mut film = self.existing_film(film_id).await?;
        if !self.user_exists(user_id).await? {
            return Err(CatalogError::user_not_found(user_id));
        }

        let changed = if liked {
            film.likes.insert(user_id)
        } else {
            film.likes.remove(&user_id)
        };
        if changed {
            self.film_repo.update(film).await?;
            debug!(%film_id, %user_id, liked, "film likes changed");
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FilmService for RealFilmService {
    async fn add_film(&self, mut film: Film) -> Result<Film, CatalogError> {
        validate_film(&film)?;
        // likes only come from add_like
        film.likes.clear();
        let film = self.film_repo.add(film).await?;
        info!(film_id = %film.id, name = %film.name, "film created");
        Ok(film)
    }

    async fn update_film(&self, mut film: Film) -> Result<Film, CatalogError> {
        validate_film(&film)?;

        let tx = self.tx_manager.begin().await?;
        let existing = self.existing_film(film.id).await?;
        // likes change only through add_like/remove_like
        film.likes = existing.likes;
        let film = self.film_repo.update(film).await?;
        tx.commit().await?;

        info!(film_id = %film.id, "film updated");
        Ok(film)
    }

    async fn get_all_films(&self) -> Result<Vec<Film>, CatalogError> {
        Ok(self.film_repo.find_all().await?)
    }

    async fn get_film_by_id(&self, id: FilmId) -> Result<Film, CatalogError> {
        self.existing_film(id).await
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError> {
        self.set_like(film_id, user_id, true).await
    }

    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError> {
        self.set_like(film_id, user_id, false).await
    }

    async fn get_popular_films(&self, count: i64) -> Result<Vec<Film>, CatalogError> {
        let count = validate_popular_count(count)?;

        let mut films = self.film_repo.find_all().await?;
        // stable sort: equal popularity keeps storage order
        films.sort_by(|a, b| b.popularity().cmp(&a.popularity()));
        films.truncate(count);
        Ok(films)
    }
}
