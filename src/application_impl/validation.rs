use crate::application_port::CatalogError;
use crate::domain_model::{Film, User};
use chrono::NaiveDate;
use tracing::warn;

pub const FILM_NAME_BLANK: &str = "Название фильма не может быть пустым";
pub const FILM_DESCRIPTION_TOO_LONG: &str = "Описание фильма не может превышать 200 символов";
pub const FILM_RELEASE_TOO_EARLY: &str = "Дата релиза не может быть раньше 28 декабря 1895 года";
pub const FILM_DURATION_NOT_POSITIVE: &str = "Продолжительность фильма должна быть положительной";
pub const POPULAR_COUNT_NOT_POSITIVE: &str =
    "Количество возвращаемых фильмов должно быть положительным";

pub const USER_EMAIL_INVALID: &str = "Некорректный email";
pub const USER_LOGIN_INVALID: &str = "Логин не может быть пустым и содержать пробелы";
pub const USER_BIRTHDAY_IN_FUTURE: &str = "Дата рождения не может быть в будущем";
pub const USER_SELF_FRIEND: &str = "Нельзя добавить в друзья самого себя";

pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// First film ever shown to a paying audience.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn reject(message: &str) -> CatalogError {
    warn!("validation failed: {message}");
    CatalogError::Validation(message.to_owned())
}

/// Rules are checked in order and the first failure wins.
pub fn validate_film(film: &Film) -> Result<(), CatalogError> {
    if is_blank(&film.name) {
        return Err(reject(FILM_NAME_BLANK));
    }
    if film.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(reject(FILM_DESCRIPTION_TOO_LONG));
    }
    match film.release_date {
        Some(date) if date >= earliest_release_date() => {}
        _ => return Err(reject(FILM_RELEASE_TOO_EARLY)),
    }
    if film.duration <= 0 {
        return Err(reject(FILM_DURATION_NOT_POSITIVE));
    }
    Ok(())
}

/// Rules are checked in order and the first failure wins.
pub fn validate_user(user: &User, today: NaiveDate) -> Result<(), CatalogError> {
    if is_blank(&user.email) || !user.email.contains('@') {
        return Err(reject(USER_EMAIL_INVALID));
    }
    if is_blank(&user.login) || user.login.chars().any(char::is_whitespace) {
        return Err(reject(USER_LOGIN_INVALID));
    }
    match user.birthday {
        Some(birthday) if birthday <= today => {}
        _ => return Err(reject(USER_BIRTHDAY_IN_FUTURE)),
    }
    Ok(())
}

pub fn validate_popular_count(count: i64) -> Result<usize, CatalogError> {
    if count <= 0 {
        return Err(reject(POPULAR_COUNT_NOT_POSITIVE));
    }
    Ok(usize::try_from(count).unwrap_or(usize::MAX))
}
