use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{models::users::User, repositories::user_repo::UserRepository, Error, Result};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_maxage: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_secret: String, jwt_maxage: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_maxage,
        }
    }

    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User> {
        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(Error::BadRequest("Username already exists".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();

        let user = self
            .user_repo
            .create_user(username, email, password_hash)
            .await?;
        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Returns a signed token. Unknown users and wrong passwords are indistinguishable.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(Error::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&user.password)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| Error::Unauthorized)?;

        self.generate_token(user.id)
    }

    fn generate_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.jwt_maxage)).timestamp() as usize;
        let iat = now.timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| Error::InternalServerError)
    }
}
