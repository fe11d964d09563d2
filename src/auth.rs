use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::core::account::Account;
use crate::storage::{LocalStore, StorageError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Per-field validation messages. Any set field blocks the operation;
/// presentation (inline display, auto-clear) is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid form input")]
    Validation(FormErrors),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Claims from an already-verified federated identity token. Verifying the
/// token is the auth provider's job, not this crate's.
#[derive(Debug, Clone)]
pub struct FederatedClaims {
    pub subject: String,
    pub name: String,
    pub email: String,
}

pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    if email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !EMAIL_RE.is_match(email.trim()) {
        errors.email = Some("Email is invalid".to_string());
    }
    if password.is_empty() {
        errors.password = Some("Password is required".to_string());
    }
    errors
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FormErrors {
    let mut errors = validate_login(email, password);
    if name.trim().is_empty() {
        errors.name = Some("Name is required".to_string());
    }
    if !password.is_empty() && password != confirm_password {
        errors.confirm_password = Some("Passwords do not match".to_string());
    }
    errors
}

/// Register a local account and establish its session.
///
/// The password is validated for shape only and never stored; this is a
/// demo-grade client-side gate, not real authentication.
pub fn register(
    store: &LocalStore,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Account, AuthError> {
    let errors = validate_registration(name, email, password, confirm_password);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    let account = Account::new_local(name.trim(), email.trim());
    store.write_session(&account)?;
    log::info!("Registered local account {}", account.id());
    Ok(account)
}

/// Email/password sign-in against the locally-stored profile.
pub fn sign_in(store: &LocalStore, email: &str, password: &str) -> Result<Account, AuthError> {
    let errors = validate_login(email, password);
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    match store.read_session() {
        Some(account) if account.email() == email.trim() => {
            log::info!("Signed in account {}", account.id());
            Ok(account)
        }
        _ => Err(AuthError::InvalidCredentials),
    }
}

/// Establish a session from verified federated token claims.
pub fn sign_in_federated(
    store: &LocalStore,
    claims: FederatedClaims,
) -> Result<Account, AuthError> {
    let account = Account::new_federated(claims.subject, claims.name, claims.email);
    store.write_session(&account)?;
    log::info!("Signed in federated account {}", account.id());
    Ok(account)
}

/// Destroy the session. The caller drops its `TodoStore` alongside.
pub fn sign_out(store: &LocalStore) -> Result<(), AuthError> {
    store.clear_session()?;
    Ok(())
}
