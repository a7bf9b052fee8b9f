use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::logger::*;
use crate::settings::Settings;
use nanoid::nanoid;
use std::sync::Arc;

pub struct Server {
    pub film_service: Arc<dyn FilmService>,
    pub user_service: Arc<dyn UserService>,
    pub popular_default_count: i64,
    film_repo: Arc<dyn FilmRepo>,
    user_repo: Arc<dyn UserRepo>,
    run_id: String,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let popular_default_count = settings.catalog.popular_default_count;
        if popular_default_count <= 0 {
            return Err(anyhow::anyhow!(
                "catalog.popular_default_count must be positive, got {}",
                popular_default_count
            ));
        }

        let server = match settings.storage.backend.as_str() {
            "memory" => Self::in_memory(popular_default_count),
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        info!(run_id = %server.run_id, backend = %settings.storage.backend, "server started");
        Ok(server)
    }

    /// Wires both services onto fresh in-memory storage.
    pub fn in_memory(popular_default_count: i64) -> Self {
        let alphabet: [char; 16] = [
            '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
        ];
        let run_id = nanoid!(10, &alphabet);

        let tx_manager: Arc<dyn TxManager> = Arc::new(MemoryTxManager::new());
        let film_repo: Arc<dyn FilmRepo> = Arc::new(MemoryFilmRepo::new());
        let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new());

        let film_service: Arc<dyn FilmService> = Arc::new(RealFilmService::new(
            film_repo.clone(),
            user_repo.clone(),
            tx_manager.clone(),
        ));
        let user_service: Arc<dyn UserService> =
            Arc::new(RealUserService::new(user_repo.clone(), tx_manager.clone()));

        Self {
            film_service,
            user_service,
            popular_default_count,
            film_repo,
            user_repo,
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub async fn shutdown(&self) {
        info!(run_id = %self.run_id, "server shutting down...");

        // in-memory records do not survive the process
        match (self.film_repo.count().await, self.user_repo.count().await) {
            (Ok(films), Ok(users)) => info!(films, users, "discarding catalog"),
            (Err(e), _) | (_, Err(e)) => warn!("counting records on shutdown: {}", e),
        }
    }
}
