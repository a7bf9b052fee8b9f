use super::handler::{self, PopularQuery};
use crate::domain_model::{FilmId, UserId};
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

const MAX_BODY_BYTES: u64 = 16 * 1024;

// Path filters come before method filters so an unknown path is a 404, not a 405.
pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    film_routes(server.clone()).or(user_routes(server))
}

fn film_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let films = warp::path("films");

    let create = films
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.film_service.clone()))
        .and_then(handler::create_film);

    let update = films
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with(server.film_service.clone()))
        .and_then(handler::update_film);

    let list = films
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.film_service.clone()))
        .and_then(handler::list_films);

    let default_count = server.popular_default_count;
    let popular = films
        .and(warp::path("popular"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PopularQuery>())
        .map(move |query: PopularQuery| query.count.unwrap_or(default_count))
        .and(with(server.film_service.clone()))
        .and_then(handler::popular_films);

    let by_id = films
        .and(warp::path::param::<FilmId>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.film_service.clone()))
        .and_then(handler::get_film);

    let like = films
        .and(warp::path::param::<FilmId>())
        .and(warp::path("like"))
        .and(warp::path::param::<UserId>())
        .and(warp::path::end());

    let add_like = like
        .and(warp::put())
        .and(with(server.film_service.clone()))
        .and_then(handler::add_like);

    let remove_like = like
        .and(warp::delete())
        .and(with(server.film_service.clone()))
        .and_then(handler::remove_like);

    create
        .or(update)
        .or(list)
        .or(popular)
        .or(by_id)
        .or(add_like)
        .or(remove_like)
}

fn user_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let users = warp::path("users");

    let create = users
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with(server.user_service.clone()))
        .and_then(handler::create_user);

    let update = users
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with(server.user_service.clone()))
        .and_then(handler::update_user);

    let list = users
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::list_users);

    let by_id = users
        .and(warp::path::param::<UserId>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::get_user);

    let friend = users
        .and(warp::path::param::<UserId>())
        .and(warp::path("friends"))
        .and(warp::path::param::<UserId>())
        .and(warp::path::end());

    let add_friend = friend
        .and(warp::put())
        .and(with(server.user_service.clone()))
        .and_then(handler::add_friend);

    let remove_friend = friend
        .and(warp::delete())
        .and(with(server.user_service.clone()))
        .and_then(handler::remove_friend);

    let friends = users
        .and(warp::path::param::<UserId>())
        .and(warp::path("friends"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::list_friends);

    let common_friends = users
        .and(warp::path::param::<UserId>())
        .and(warp::path("friends"))
        .and(warp::path("common"))
        .and(warp::path::param::<UserId>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::list_common_friends);

    create
        .or(update)
        .or(list)
        .or(by_id)
        .or(add_friend)
        .or(remove_friend)
        .or(friends)
        .or(common_friends)
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
