use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Store a new user under a freshly assigned id. Any id on the input is ignored.
    async fn add(&self, user: User) -> Result<User, StoreError>;

    /// Replace the user stored under `user.id`; `NotFound` if there is none.
    async fn update(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// All users in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
