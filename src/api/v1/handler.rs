use super::error::*;
use crate::application_port::{FilmService, UserService};
use crate::domain_model::*;
use serde::Deserialize;
use std::sync::Arc;
use warp::{self, reject};

// region films

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

pub async fn create_film(
    body: Film,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let film = film_service
        .add_film(body)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&film))
}

pub async fn update_film(
    body: Film,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let film = film_service
        .update_film(body)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&film))
}

pub async fn list_films(
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let films = film_service
        .get_all_films()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&films))
}

pub async fn popular_films(
    count: i64,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let films = film_service
        .get_popular_films(count)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&films))
}

pub async fn get_film(
    film_id: FilmId,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let film = film_service
        .get_film_by_id(film_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&film))
}

pub async fn add_like(
    film_id: FilmId,
    user_id: UserId,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    film_service
        .add_like(film_id, user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply())
}

pub async fn remove_like(
    film_id: FilmId,
    user_id: UserId,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    film_service
        .remove_like(film_id, user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply())
}

// endregion

// region users

pub async fn create_user(
    body: User,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .add_user(body)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&user))
}

pub async fn update_user(
    body: User,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .update_user(body)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&user))
}

pub async fn list_users(
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let users = user_service
        .get_all_users()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&users))
}

pub async fn get_user(
    user_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .get_user_by_id(user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&user))
}

pub async fn add_friend(
    user_id: UserId,
    friend_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    user_service
        .add_friend(user_id, friend_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply())
}

pub async fn remove_friend(
    user_id: UserId,
    friend_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    user_service
        .remove_friend(user_id, friend_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply())
}

pub async fn list_friends(
    user_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let friends = user_service
        .get_friends(user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&friends))
}

pub async fn list_common_friends(
    user_id: UserId,
    other_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let friends = user_service
        .get_common_friends(user_id, other_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;
    Ok(warp::reply::json(&friends))
}

// endregion
