use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 用户名/密码不在用户表中
    #[error("Invalid credentials. Authentication fails.")]
    InvalidCredentials,

    /// 所选领域没有题目
    #[error("No questions available for the selected domain ({domain}).")]
    NoQuestionsAvailable { domain: String },

    #[error("Please log in to start an interview session.")]
    LoginRequired,

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid credentials. Authentication fails."
        );
        let err = AppError::NoQuestionsAvailable {
            domain: "Empty".to_string(),
        };
        assert!(err.to_string().starts_with("No questions available"));

        let err = AppError::config("/tmp/config.toml", "bad value");
        assert_eq!(err.to_string(), "invalid config /tmp/config.toml: bad value");
    }
}
