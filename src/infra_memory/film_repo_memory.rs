use super::MemoryTable;
use crate::domain_model::*;
use crate::domain_port::*;

#[derive(Default)]
pub struct MemoryFilmRepo {
    table: MemoryTable<Film>,
}

impl MemoryFilmRepo {
    pub fn new() -> Self {
        MemoryFilmRepo {
            table: MemoryTable::new(),
        }
    }
}

#[async_trait::async_trait]
impl FilmRepo for MemoryFilmRepo {
    async fn add(&self, mut film: Film) -> Result<Film, StoreError> {
        film.id = FilmId(self.table.next_id());
        self.table.insert(film.id.0, film.clone());
        Ok(film)
    }

    async fn update(&self, film: Film) -> Result<Film, StoreError> {
        self.table.replace(film.id.0, film.clone())?;
        Ok(film)
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, StoreError> {
        Ok(self.table.get(id.0))
    }

    async fn find_all(&self) -> Result<Vec<Film>, StoreError> {
        Ok(self.table.all())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.table.len())
    }
}
