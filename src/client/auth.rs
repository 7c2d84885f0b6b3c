use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use super::api::{ApiError, AuthApi, LoginRequest, LoginResponse, RegisterRequest};

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";
pub const LOGIN_FAILED_NOTICE: &str = "Login failed. Please check your credentials.";
pub const SIGNUP_SUCCEEDED_NOTICE: &str = "Signup successful! Please login.";
pub const SIGNUP_FAILED_NOTICE: &str = "Signup failed.";

/// Which auth overlay is showing. Login and signup are never open together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Login,
    Signup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("a login request is already in flight")]
    LoginPending,
    #[error("no auth form is open")]
    NoOpenForm,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Handle for one login request. Completing it after a newer request was started, or after
/// the login modal was dismissed, has no effect.
#[derive(Debug)]
pub struct LoginTicket {
    generation: u64,
    request: LoginRequest,
}

impl LoginTicket {
    pub fn request(&self) -> &LoginRequest {
        &self.request
    }
}

/// Login/signup UI state. Being logged in only decides which controls the view shows; it
/// guards nothing.
#[derive(Debug, Clone, Default)]
pub struct AuthController {
    modal: Modal,
    logged_in: bool,
    form: AuthForm,
    login_status: LoginStatus,
    notice: Option<String>,
    generation: u64,
}

impl AuthController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    pub fn login_status(&self) -> &LoginStatus {
        &self.login_status
    }

    /// Error text shown inside the login modal.
    pub fn login_error(&self) -> Option<&str> {
        match (&self.login_status, self.modal) {
            (LoginStatus::Failed(message), Modal::Login) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Last confirmation or failure notice for the user.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn open_login(&mut self) {
        self.modal = Modal::Login;
    }

    pub fn open_signup(&mut self) {
        self.modal = Modal::Signup;
    }

    /// Closes whichever modal is open and abandons an in-flight login.
    pub fn close_modal(&mut self) {
        if self.login_status == LoginStatus::Pending {
            self.generation += 1;
            self.login_status = LoginStatus::Idle;
        }
        self.modal = Modal::Closed;
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    /// Starts a login with the current form contents.
    pub fn begin_login(&mut self) -> Result<LoginTicket, AuthError> {
        if self.modal != Modal::Login {
            return Err(AuthError::NoOpenForm);
        }
        if self.login_status == LoginStatus::Pending {
            return Err(AuthError::LoginPending);
        }
        require(&self.form.username, "Username")?;
        require(&self.form.password, "Password")?;

        self.generation += 1;
        self.login_status = LoginStatus::Pending;
        Ok(LoginTicket {
            generation: self.generation,
            request: LoginRequest {
                username: self.form.username.clone(),
                password: self.form.password.clone(),
            },
        })
    }

    /// Applies the outcome of `ticket`'s request. Returns `false` if the ticket was stale.
    pub fn finish_login(
        &mut self,
        ticket: LoginTicket,
        result: Result<LoginResponse, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation || self.login_status != LoginStatus::Pending {
            debug!(generation = ticket.generation, "ignoring stale login response");
            return false;
        }

        match result {
            Ok(_) => {
                info!("login succeeded");
                self.logged_in = true;
                self.modal = Modal::Closed;
                self.login_status = LoginStatus::Idle;
            }
            Err(err) => {
                error!("Login failed: {}", err);
                self.login_status = LoginStatus::Failed(failure_message(&err));
                self.notice = Some(LOGIN_FAILED_NOTICE.to_string());
                self.modal = Modal::Login;
            }
        }
        self.form = AuthForm::default();
        true
    }

    pub async fn login<A: AuthApi + ?Sized>(&mut self, api: &A) -> Result<(), AuthError> {
        let ticket = self.begin_login()?;
        let result = api.login(ticket.request()).await;
        self.finish_login(ticket, result);
        Ok(())
    }

    /// On failure the signup modal stays open and the form keeps its contents.
    pub async fn signup<A: AuthApi + ?Sized>(&mut self, api: &A) -> Result<(), AuthError> {
        if self.modal != Modal::Signup {
            return Err(AuthError::NoOpenForm);
        }
        require(&self.form.username, "Username")?;
        require(&self.form.email, "Email")?;
        require(&self.form.password, "Password")?;

        let request = RegisterRequest {
            username: self.form.username.clone(),
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        };

        match api.register(&request).await {
            Ok(()) => {
                self.modal = Modal::Closed;
                self.notice = Some(SIGNUP_SUCCEEDED_NOTICE.to_string());
            }
            Err(err) => {
                error!("Signup error: {}", err);
                self.notice = Some(SIGNUP_FAILED_NOTICE.to_string());
            }
        }
        Ok(())
    }

    /// Submits whichever auth form is open.
    pub async fn submit<A: AuthApi + ?Sized>(&mut self, api: &A) -> Result<(), AuthError> {
        match self.modal {
            Modal::Login => self.login(api).await,
            Modal::Signup => self.signup(api).await,
            Modal::Closed => Err(AuthError::NoOpenForm),
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Server message first, then the error's own description, then a generic fallback.
fn failure_message(err: &ApiError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    let description = err.to_string();
    if description.trim().is_empty() {
        LOGIN_FALLBACK_MESSAGE.to_string()
    } else {
        description
    }
}
