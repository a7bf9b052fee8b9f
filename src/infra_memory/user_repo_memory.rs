use super::MemoryTable;
use crate::domain_model::*;
use crate::domain_port::*;

#[derive(Default)]
pub struct MemoryUserRepo {
    table: MemoryTable<User>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        MemoryUserRepo {
            table: MemoryTable::new(),
        }
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn add(&self, mut user: User) -> Result<User, StoreError> {
        user.id = UserId(self.table.next_id());
        self.table.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        self.table.replace(user.id.0, user.clone())?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.table.get(id.0))
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.table.all())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.table.len())
    }
}
