//! 静态用户表登录

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// 用户表中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub name: String,
}

impl UserRecord {
    fn new(username: &str, password: &str, role: Role, name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
            name: name.to_string(),
        }
    }
}

/// 已登录用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub name: String,
    pub role: Role,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&UserRecord> for UserAccount {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            name: record.name.clone(),
            role: record.role,
        }
    }
}

pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new("user1", "pass123", Role::User, "John Doe"),
        UserRecord::new("admin", "admin123", Role::Admin, "Admin User"),
        UserRecord::new("testuser", "test123", Role::User, "Test User"),
    ]
}

#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserAccount, AppError> {
        match self.find(username) {
            Some(record) if record.password == password => {
                info!("user {username} signed in");
                Ok(UserAccount::from(record))
            }
            _ => {
                warn!("rejected sign-in for {username:?}");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// 快捷登录：不校验密码，只要求用户存在
    pub fn quick_login(&self, username: &str) -> Result<UserAccount, AppError> {
        self.find(username)
            .map(UserAccount::from)
            .ok_or(AppError::InvalidCredentials)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(default_users())
    }
}
