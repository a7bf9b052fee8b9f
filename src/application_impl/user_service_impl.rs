use super::validation::{USER_SELF_FRIEND, validate_user};
use crate::application_port::{CatalogError, UserService};
use crate::domain_model::*;
use crate::domain_port::{TxManager, UserRepo};
use crate::logger::*;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
    tx_manager: Arc<dyn TxManager>,
    today: fn() -> NaiveDate,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>, tx_manager: Arc<dyn TxManager>) -> RealUserService {
        RealUserService {
            user_repo,
            tx_manager,
            today: local_today,
        }
    }

    /// Replace the clock used for the birthday check.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn prepare(&self, mut user: User) -> Result<User, CatalogError> {
        validate_user(&user, (self.today)())?;
        user.name = Some(user.display_name().to_owned());
        Ok(user)
    }

    async fn existing_user(&self, id: UserId) -> Result<User, CatalogError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::user_not_found(id))
    }

    // Ids without a record are skipped.
    async fn resolve(&self, owner: UserId, ids: Vec<UserId>) -> Result<Vec<User>, CatalogError> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            match self.user_repo.find_by_id(id).await? {
                Some(user) => users.push(user),
                None => warn!(%owner, friend_id = %id, "stale friend id skipped"),
            }
        }
        Ok(users)
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn add_user(&self, user: User) -> Result<User, CatalogError> {
        let mut user = self.prepare(user)?;
        // friendships only come from add_friend
        user.friends.clear();
        let user = self.user_repo.add(user).await?;
        info!(user_id = %user.id, login = %user.login, "user created");
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, CatalogError> {
        let mut user = self.prepare(user)?;

        let tx = self.tx_manager.begin().await?;
        let existing = self.existing_user(user.id).await?;
        // friends change only through add_friend/remove_friend, which keep both sides in sync
        user.friends = existing.friends;
        let user = self.user_repo.update(user).await?;
        tx.commit().await?;

        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, CatalogError> {
        Ok(self.user_repo.find_all().await?)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, CatalogError> {
        self.existing_user(id).await
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), CatalogError> {
        let tx = self.tx_manager.begin().await?;

        // both sides are checked before either is written
        let mut user = self.existing_user(user_id).await?;
        let mut friend = self.existing_user(friend_id).await?;
        if user_id == friend_id {
            return Err(CatalogError::Validation(USER_SELF_FRIEND.to_owned()));
        }

        let added_forward = user.friends.insert(friend_id);
        let added_backward = friend.friends.insert(user_id);
        if added_forward || added_backward {
            self.user_repo.update(user).await?;
            self.user_repo.update(friend).await?;
            info!(%user_id, %friend_id, "friendship added");
        }

        tx.commit().await?;
        Ok(())
    }

    async fn remove_friend(
        &self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<(), CatalogError> {
        let tx = self.tx_manager.begin().await?;

        let mut user = self.existing_user(user_id).await?;
        let mut friend = self.existing_user(friend_id).await?;
        if user_id == friend_id {
            return Ok(());
        }

        let removed_forward = user.friends.remove(&friend_id);
        let removed_backward = friend.friends.remove(&user_id);
        if removed_forward || removed_backward {
            self.user_repo.update(user).await?;
            self.user_repo.update(friend).await?;
            info!(%user_id, %friend_id, "friendship removed");
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_friends(&self, user_id: UserId) -> Result<Vec<User>, CatalogError> {
        let user = self.existing_user(user_id).await?;
        self.resolve(user_id, user.friends.into_iter().collect()).await
    }

    async fn get_common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, CatalogError> {
        let user = self.existing_user(user_id).await?;
        let other = self.existing_user(other_id).await?;
        let common = user
            .friends
            .intersection(&other.friends)
            .copied()
            .collect();
        self.resolve(user_id, common).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::validation::*;
    use crate::domain_port::UserRepo;
    use crate::infra_memory::*;
    use std::collections::BTreeSet;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    struct Fixture {
        service: RealUserService,
        repo: Arc<MemoryUserRepo>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(MemoryUserRepo::new());
        let service = RealUserService::new(repo.clone(), Arc::new(MemoryTxManager::new()))
            .with_clock(fixed_today);
        Fixture { service, repo }
    }

    fn user(login: &str) -> User {
        User {
            email: format!("{login}@example.com"),
            login: login.to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 5),
            ..Default::default()
        }
    }

    async fn add_users(fx: &Fixture, n: usize) -> Vec<UserId> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            ids.push(fx.service.add_user(user(&format!("user{i}"))).await.unwrap().id);
        }
        ids
    }

    fn ids(users: Vec<User>) -> BTreeSet<UserId> {
        users.into_iter().map(|u| u.id).collect()
    }

    fn validation_message(err: CatalogError) -> String {
        match err {
            CatalogError::Validation(message) => message,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_user_blank_name_falls_back_to_login() {
        let fx = fixture();
        let mut input = user("testlogin");
        input.email = "test@example.com".to_string();
        input.name = Some(String::new());

        let created = fx.service.add_user(input).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("testlogin"));
        assert_eq!(created.id, UserId(1));

        let created = fx.service.add_user(user("absent")).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("absent"));
    }

    #[tokio::test]
    async fn add_user_keeps_given_name() {
        let fx = fixture();
        let mut input = user("dolore");
        input.name = Some("Nick Name".to_string());

        let created = fx.service.add_user(input).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("Nick Name"));
    }

    #[tokio::test]
    async fn add_user_rejections() {
        let fx = fixture();

        let mut input = user("x");
        input.email = "invalidemail".to_string();
        assert_eq!(
            validation_message(fx.service.add_user(input).await.unwrap_err()),
            USER_EMAIL_INVALID
        );

        let mut input = user("x");
        input.login = "dolore ullamco".to_string();
        assert_eq!(
            validation_message(fx.service.add_user(input).await.unwrap_err()),
            USER_LOGIN_INVALID
        );

        let mut input = user("x");
        input.birthday = NaiveDate::from_ymd_opt(2024, 6, 2);
        assert_eq!(
            validation_message(fx.service.add_user(input).await.unwrap_err()),
            USER_BIRTHDAY_IN_FUTURE
        );

        assert!(fx.service.get_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_user_requires_existing_id() {
        let fx = fixture();
        let mut ghost = user("ghost");
        ghost.id = UserId(9999);

        let err = fx.service.update_user(ghost).await.unwrap_err();
        assert!(
            matches!(err, CatalogError::NotFound(ref m) if m == "Пользователь с id 9999 не найден")
        );
    }

    #[tokio::test]
    async fn update_user_applies_name_fallback() {
        let fx = fixture();
        let mut stored = fx.service.add_user(user("before")).await.unwrap();
        stored.login = "after".to_string();
        stored.name = Some("   ".to_string());

        let updated = fx.service.update_user(stored).await.unwrap();
        assert_eq!(updated.name.as_deref(), Some("after"));
        assert_eq!(fx.service.get_user_by_id(updated.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_user_keeps_stored_friends() {
        let fx = fixture();
        let u = add_users(&fx, 2).await;
        fx.service.add_friend(u[0], u[1]).await.unwrap();

        let mut edited = fx.service.get_user_by_id(u[0]).await.unwrap();
        edited.friends.clear();
        edited.name = Some("Renamed".to_string());
        let updated = fx.service.update_user(edited.clone()).await.unwrap();
        assert_eq!(updated.friends, BTreeSet::from([u[1]]));
        assert_eq!(updated.name.as_deref(), Some("Renamed"));

        edited.friends = BTreeSet::from([UserId(777)]);
        fx.service.update_user(edited).await.unwrap();

        let a = fx.service.get_user_by_id(u[0]).await.unwrap();
        let b = fx.service.get_user_by_id(u[1]).await.unwrap();
        assert_eq!(a.friends, BTreeSet::from([u[1]]));
        assert_eq!(b.friends, BTreeSet::from([u[0]]));
    }

    #[tokio::test]
    async fn add_user_ignores_submitted_friends() {
        let fx = fixture();
        let mut input = user("loner");
        input.friends = BTreeSet::from([UserId(5), UserId(6)]);

        let created = fx.service.add_user(input).await.unwrap();
        assert!(created.friends.is_empty());
        assert!(fx.service.get_friends(created.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_friend_is_symmetric() {
        let fx = fixture();
        let u = add_users(&fx, 2).await;

        fx.service.add_friend(u[0], u[1]).await.unwrap();

        assert_eq!(ids(fx.service.get_friends(u[0]).await.unwrap()), BTreeSet::from([u[1]]));
        assert_eq!(ids(fx.service.get_friends(u[1]).await.unwrap()), BTreeSet::from([u[0]]));
    }

    #[tokio::test]
    async fn add_friend_is_idempotent() {
        let fx = fixture();
        let u = add_users(&fx, 2).await;

        fx.service.add_friend(u[0], u[1]).await.unwrap();
        fx.service.add_friend(u[1], u[0]).await.unwrap();

        let stored = fx.service.get_user_by_id(u[0]).await.unwrap();
        assert_eq!(stored.friends, BTreeSet::from([u[1]]));
    }

    #[tokio::test]
    async fn add_friend_unknown_id_leaves_both_sides_untouched() {
        let fx = fixture();
        let u = add_users(&fx, 1).await;

        let err = fx.service.add_friend(u[0], UserId(77)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        let err = fx.service.add_friend(UserId(77), u[0]).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        assert!(fx.service.get_user_by_id(u[0]).await.unwrap().friends.is_empty());
    }

    #[tokio::test]
    async fn add_friend_rejects_self() {
        let fx = fixture();
        let u = add_users(&fx, 1).await;

        let err = fx.service.add_friend(u[0], u[0]).await.unwrap_err();
        assert_eq!(validation_message(err), USER_SELF_FRIEND);
        fx.service.remove_friend(u[0], u[0]).await.unwrap();
    }

    #[tokio::test]
    async fn remove_friend_is_symmetric_and_idempotent() {
        let fx = fixture();
        let u = add_users(&fx, 3).await;
        fx.service.add_friend(u[0], u[1]).await.unwrap();
        fx.service.add_friend(u[0], u[2]).await.unwrap();

        fx.service.remove_friend(u[1], u[0]).await.unwrap();
        fx.service.remove_friend(u[1], u[0]).await.unwrap();

        assert_eq!(ids(fx.service.get_friends(u[0]).await.unwrap()), BTreeSet::from([u[2]]));
        assert!(fx.service.get_friends(u[1]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_friends_unknown_user() {
        let fx = fixture();
        let err = fx.service.get_friends(UserId(5)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn common_friends_is_intersection() {
        let fx = fixture();
        let u = add_users(&fx, 5).await;
        // u0: {u2, u3, u4}; u1: {u3, u4}
        for f in [u[2], u[3], u[4]] {
            fx.service.add_friend(u[0], f).await.unwrap();
        }
        for f in [u[3], u[4]] {
            fx.service.add_friend(u[1], f).await.unwrap();
        }

        let common = fx.service.get_common_friends(u[0], u[1]).await.unwrap();
        assert_eq!(ids(common), BTreeSet::from([u[3], u[4]]));

        let common = fx.service.get_common_friends(u[2], u[1]).await.unwrap();
        assert!(common.is_empty());

        let err = fx.service.get_common_friends(u[0], UserId(99)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn stale_friend_ids_are_skipped() {
        let fx = fixture();
        let u = add_users(&fx, 2).await;
        fx.service.add_friend(u[0], u[1]).await.unwrap();

        // a friend id pointing nowhere, written past the service
        let mut stored = fx.repo.find_by_id(u[0]).await.unwrap().unwrap();
        stored.friends.insert(UserId(404));
        fx.repo.update(stored).await.unwrap();

        assert_eq!(ids(fx.service.get_friends(u[0]).await.unwrap()), BTreeSet::from([u[1]]));
    }

    #[tokio::test]
    async fn concurrent_friendships_stay_mutual() {
        let fx = fixture();
        let hub = fx.service.add_user(user("hub")).await.unwrap().id;
        let others = add_users(&fx, 16).await;
        let service = Arc::new(fx.service);

        let mut handles = Vec::new();
        for other in others.clone() {
            let service = service.clone();
            handles.push(tokio::spawn(async move { service.add_friend(hub, other).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let friends = ids(service.get_friends(hub).await.unwrap());
        assert_eq!(friends, others.iter().copied().collect());
        for other in others {
            assert!(service.get_user_by_id(other).await.unwrap().friends.contains(&hub));
        }
    }
}
