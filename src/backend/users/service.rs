//! User Administration Service
//!
//! Admin-only account management. The guards run in a fixed order so the
//! caller always sees the first rule the request breaks: input checks, then
//! existence, then the rules about the acting admin and the target account.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::{hash_password, Role, UserStore};
use crate::backend::contacts::service::ContactService;
use crate::backend::error::{BackendError, StoreError};
use crate::backend::middleware::auth::Principal;
use crate::shared::pagination::{PageRequest, UserPagination};
use crate::shared::validation::validate_credentials;
use crate::shared::SharedError;

/// Users per page when the client does not ask for a size
pub const DEFAULT_USER_PAGE_SIZE: u64 = 10;

/// New account requested by an admin
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// `"user"` when absent
    #[serde(default)]
    pub role: Option<String>,
}

/// One page of the user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub users: Vec<UserResponse>,
    pub pagination: UserPagination,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    contacts: Arc<ContactService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, contacts: Arc<ContactService>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            contacts,
            bcrypt_cost,
        }
    }

    /// Newest accounts first
    pub async fn list(&self, page: PageRequest) -> Result<UserPage, BackendError> {
        let total = self.users.count().await?;
        let users = self.users.list(page.skip(), page.limit).await?;
        Ok(UserPage {
            users: users.iter().map(UserResponse::from).collect(),
            pagination: page.paginate(total).into(),
        })
    }

    pub async fn create(&self, request: &CreateUserRequest) -> Result<UserResponse, BackendError> {
        let username = validate_credentials(&request.username, &request.password)?;
        let role = match request.role.as_deref() {
            None => Role::User,
            Some(raw) => parse_role(raw)?,
        };

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = match self.users.create(&username, password_hash, role).await {
            Ok(user) => user,
            Err(StoreError::Duplicate(_)) => {
                return Err(BackendError::conflict("Username already exists"));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("[Users] Created {} ({})", user.username, user.role);
        Ok(UserResponse::from(&user))
    }

    pub async fn update_role(
        &self,
        actor: &Principal,
        id: Uuid,
        role: Option<&str>,
    ) -> Result<UserResponse, BackendError> {
        let role = parse_role(role.unwrap_or_default())?;

        if self.users.find_by_id(id).await?.is_none() {
            return Err(BackendError::not_found("User"));
        }
        if id == actor.user_id {
            return Err(BackendError::forbidden("Cannot change your own role"));
        }

        let user = self
            .users
            .update_role(id, role)
            .await?
            .ok_or_else(|| BackendError::not_found("User"))?;

        tracing::info!("[Users] {} set role of {} to {}", actor.username, user.username, role);
        Ok(UserResponse::from(&user))
    }

    pub async fn delete(&self, actor: &Principal, id: Uuid) -> Result<(), BackendError> {
        let target = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackendError::not_found("User"))?;

        if target.id == actor.user_id {
            return Err(BackendError::forbidden("Cannot delete your own account"));
        }
        if target.is_admin() {
            return Err(BackendError::forbidden("Cannot delete an admin user"));
        }
        if self.contacts.count_created_by(&target.username).await? > 0 {
            return Err(BackendError::forbidden("User has contacts and cannot be deleted"));
        }

        self.users
            .delete_by_id(id)
            .await?
            .ok_or_else(|| BackendError::not_found("User"))?;

        tracing::info!("[Users] {} deleted {}", actor.username, target.username);
        Ok(())
    }
}

fn parse_role(raw: &str) -> Result<Role, BackendError> {
    Role::parse(raw)
        .ok_or_else(|| SharedError::validation("role", "Valid role (user or admin) is required").into())
}
