use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use tower_cookies::Cookie;
use tracing::warn;
use validator::Validate;

use crate::{
    models::{
        response::MessageResponse,
        users::{LoginUserDto, RegisterUserDto, UserLoginResponseDto},
    },
    AppState, Result,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(new_user): Json<RegisterUserDto>,
) -> Result<impl IntoResponse> {
    new_user.validate()?;

    app_state
        .auth_service
        .register(new_user.username, new_user.email, new_user.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::success(
            "Registration successful! Please login.",
        )),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(user): Json<LoginUserDto>,
) -> Result<impl IntoResponse> {
    user.validate()?;

    let token = app_state
        .auth_service
        .login(&user.username, &user.password)
        .await?;

    let cookie_duration = time::Duration::minutes(app_state.config.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
    })
    .into_response();

    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => warn!("Could not encode token cookie: {}", err),
    }

    Ok(response)
}
