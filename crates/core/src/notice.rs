//! User-visible, non-blocking notices (toasts).
//!
//! Every error the studio surfaces becomes a [`Notice`]; none of them end
//! the session.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&CoreError> for Notice {
    fn from(err: &CoreError) -> Self {
        let title = match err {
            CoreError::NotFound { entity, .. } => format!("{entity} no longer exists"),
            CoreError::Validation(_) => "Please check your input".to_string(),
            CoreError::Generation(_) => "Generation failed".to_string(),
            CoreError::Internal(_) => "Something went wrong".to_string(),
        };
        let description = match err {
            // Internal details stay in the logs.
            CoreError::Internal(_) => None,
            CoreError::Validation(msg) | CoreError::Generation(msg) => Some(msg.clone()),
            CoreError::NotFound { id, .. } => Some(format!("id {id}")),
        };
        Self {
            level: NoticeLevel::Error,
            title,
            description,
        }
    }
}
