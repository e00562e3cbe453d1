//! User entity, its enums and request bodies

use crate::core::filter::Criteria;
use crate::core::pagination::PageSpec;
use crate::core::query::ListQuery;
use crate::entities::{default_sort_by, default_sort_order, double_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

crate::string_enum! {
    /// Account state
    pub enum UserStatus {
        Active => "active",
        Inactive => "inactive",
        Invited => "invited",
        Suspended => "suspended",
    }
    default = Active
}

crate::string_enum! {
    /// Access role
    pub enum UserRole {
        Superadmin => "superadmin",
        Admin => "admin",
        Manager => "manager",
        Cashier => "cashier",
    }
    default = Cashier
}

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,

    #[serde(skip)]
    pub hashed_password: String,

    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_record!(User, "user", "users", {
    fields: {
        "id" => id,
        "firstName" => first_name,
        "lastName" => last_name,
        "username" => username,
        "email" => email,
        "phoneNumber" => phone_number,
        "status" => status,
        "role" => role,
        "createdAt" => created_at,
        "updatedAt" => updated_at,
    },
    searchable: ["firstName", "lastName", "username", "email", "phoneNumber"],
    enums: ["status", "role"],
    unique: ["username", "email"],
});

impl User {
    /// Build a new user from a create request and an already hashed password
    pub fn new(data: UserCreate, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: data.first_name,
            last_name: data.last_name,
            username: data.username,
            email: data.email,
            phone_number: data.phone_number,
            hashed_password,
            status: data.status,
            role: data.role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build an invited placeholder account for `email`
    ///
    /// The username is the local part of the address.
    pub fn invited(email: &str, role: UserRole, hashed_password: String) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_string();
        Self::new(
            UserCreate {
                first_name: "Invited".to_string(),
                last_name: "User".to_string(),
                username,
                email: email.to_string(),
                phone_number: None,
                status: UserStatus::Invited,
                role,
                password: String::new(),
            },
            hashed_password,
        )
    }

    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Fields for a new user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[validate(length(min = 3, max = 30))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub status: UserStatus,

    #[serde(default)]
    pub role: UserRole,

    #[validate(length(min = 6))]
    pub password: String,
}

/// Partial update of a user
///
/// Absent fields are left untouched; `phoneNumber: null` clears the number.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_user_update"))]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,

    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,

    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
}

fn validate_user_update(update: &UserUpdate) -> Result<(), ValidationError> {
    match &update.phone_number {
        Some(Some(phone)) if phone.chars().count() > 20 => Err(ValidationError::new("length")
            .with_message("phoneNumber must be at most 20 characters".into())),
        _ => Ok(()),
    }
}

/// Public view of the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Counts of users by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub invited_users: usize,
    pub suspended_users: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let count = |status: UserStatus| users.iter().filter(|u| u.status == status).count();
        Self {
            total_users: users.len(),
            active_users: count(UserStatus::Active),
            inactive_users: count(UserStatus::Inactive),
            invited_users: count(UserStatus::Invited),
            suspended_users: count(UserStatus::Suspended),
        }
    }
}

// =============================================================================
// Request bodies
// =============================================================================

/// List users
///
/// `status` and `role` are plain strings: a value that names no status or
/// role matches nothing instead of being rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserListRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_page() -> i64 {
    1
}

impl ListQuery for UserListRequest {
    fn criteria(&self) -> Criteria {
        Criteria::new()
            .search(self.search.as_deref())
            .exact("status", self.status.as_deref())
            .exact("role", self.role.as_deref())
    }

    fn sort(&self) -> (&str, &str) {
        (&self.sort_by, &self.sort_order)
    }

    fn page(&self, default_page_size: i64) -> PageSpec {
        PageSpec::new(self.page, self.page_size.unwrap_or(default_page_size))
    }
}

/// Body naming a single user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserIdRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(nested)]
    pub user_data: UserCreate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub user_id: String,
    #[validate(nested)]
    #[serde(default)]
    pub user_data: UserUpdate,
}

/// Invite a user by email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteUserRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}
