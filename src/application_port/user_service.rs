use crate::application_port::CatalogError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn add_user(&self, user: User) -> Result<User, CatalogError>;
    async fn update_user(&self, user: User) -> Result<User, CatalogError>;
    async fn get_all_users(&self) -> Result<Vec<User>, CatalogError>;
    async fn get_user_by_id(&self, id: UserId) -> Result<User, CatalogError>;
    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), CatalogError>;
    async fn remove_friend(&self, user_id: UserId, friend_id: UserId)
    -> Result<(), CatalogError>;
    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, CatalogError>;
    async fn get_common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, CatalogError>;
}
