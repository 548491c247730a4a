//! Account management on top of the credential store.

use std::sync::Arc;

use regex::Regex;
use tracing::info;

use campus_core::config::BootstrapAdminConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_database::CredentialStore;
use campus_entity::user::{NewUser, User};

use crate::password::{PasswordHasher, PasswordValidator};

/// Accepted shape of a username.
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Input for a self-service signup.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Email-shaped login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password.
    pub password: String,
}

/// Fields a user may change on a profile. `None` or blank leaves the
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Creates, authenticates and administers user accounts.
#[derive(Debug, Clone)]
pub struct AccountManager {
    users: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    username_pattern: Regex,
}

impl AccountManager {
    /// Create an account manager over `users`.
    pub fn new(users: Arc<dyn CredentialStore>) -> AppResult<Self> {
        let username_pattern = Regex::new(USERNAME_PATTERN)
            .map_err(|e| AppError::internal(format!("Invalid username pattern: {e}")))?;

        Ok(Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(),
            username_pattern,
        })
    }

    /// Check that `username` is email-shaped.
    pub fn validate_username(&self, username: &str) -> AppResult<()> {
        if self.username_pattern.is_match(username) {
            Ok(())
        } else {
            Err(AppError::validation("Invalid email address"))
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords fail identically.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let rejected = || AppError::validation("Incorrect username or password");

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(rejected)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(username, "Login rejected");
            return Err(rejected());
        }

        info!(username, "Login succeeded");
        Ok(user)
    }

    /// Register a new, inactive, regular account.
    pub async fn signup(&self, account: NewAccount) -> AppResult<User> {
        self.validate_username(&account.username)?;
        self.validator.validate(&account.password)?;

        if self.users.find_by_username(&account.username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }

        let hash = self.hasher.hash_password(&account.password)?;
        let user = self
            .users
            .insert(NewUser::signup(
                account.username,
                account.first_name,
                account.last_name,
                hash,
            ))
            .await?;

        info!(user_id = user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// Create the configured administrator unless that username exists.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_bootstrap_admin(&self, config: &BootstrapAdminConfig) -> AppResult<bool> {
        self.validate_username(&config.username)?;

        if self.users.find_by_username(&config.username).await?.is_some() {
            return Ok(false);
        }

        let hash = self.hasher.hash_password(&config.password)?;
        let admin = self
            .users
            .insert(NewUser::admin(
                config.username.clone(),
                config.first_name.clone(),
                config.last_name.clone(),
                hash,
            ))
            .await?;

        info!(user_id = admin.id, username = %admin.username, "Bootstrap admin created");
        Ok(true)
    }

    /// Fetch one user.
    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Every user.
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }

    /// Users awaiting activation.
    pub async fn list_inactive(&self) -> AppResult<Vec<User>> {
        self.users.list_inactive().await
    }

    /// Update the profile of user `id` on behalf of `actor`.
    ///
    /// Non-admins may only update their own profile.
    pub async fn update_profile(
        &self,
        actor: &User,
        id: i64,
        update: ProfileUpdate,
    ) -> AppResult<User> {
        if !actor.is_admin() && actor.id != id {
            return Err(AppError::forbidden("Cannot update another user's profile"));
        }

        let mut user = self.get(id).await?;

        if let Some(first_name) = non_blank(update.first_name) {
            user.first_name = first_name;
        }
        if let Some(last_name) = non_blank(update.last_name) {
            user.last_name = last_name;
        }
        if let Some(password) = non_blank(update.password) {
            self.validator.validate(&password)?;
            user.password_hash = self.hasher.hash_password(&password)?;
        }

        let user = self.users.update(&user).await?;
        info!(user_id = user.id, actor_id = actor.id, "User profile updated");
        Ok(user)
    }

    /// Activate or deactivate user `id`.
    pub async fn set_active_status(&self, id: i64, active: bool) -> AppResult<User> {
        let mut user = self.get(id).await?;

        if user.is_active == active {
            return Err(AppError::validation(if active {
                "User is already active"
            } else {
                "User is already inactive"
            }));
        }
        if user.is_admin() && !active {
            return Err(AppError::validation("Cannot deactivate admin user"));
        }

        user.is_active = active;
        let user = self.users.update(&user).await?;
        info!(user_id = user.id, active, "User activation status changed");
        Ok(user)
    }

    /// Delete user `id` on behalf of `actor`.
    pub async fn delete(&self, actor: &User, id: i64) -> AppResult<()> {
        let user = self.get(id).await?;

        if user.id == actor.id && actor.is_admin() {
            return Err(AppError::validation("Cannot delete yourself"));
        }

        if !self.users.delete(user.id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = user.id, actor_id = actor.id, "User deleted");
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
