use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use siteboard_core::{CommentId, DomainError, Entity, UserId};

const MAX_BODY_LEN: usize = 2000;

/// A comment left by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    user_id: UserId,
    body: String,
    created_at: DateTime<Utc>,
}

/// Input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub user_id: UserId,
    pub body: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), DomainError> {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("body cannot be empty"));
        }
        if trimmed.chars().count() > MAX_BODY_LEN {
            return Err(DomainError::validation(format!(
                "body cannot exceed {MAX_BODY_LEN} characters"
            )));
        }
        Ok(())
    }
}

impl Comment {
    /// Validate the input and mint a new comment with a fresh id.
    pub fn create(new: NewComment) -> Result<Self, DomainError> {
        new.validate()?;
        Ok(Self {
            id: CommentId::new(),
            user_id: new.user_id,
            body: new.body.trim().to_string(),
            created_at: Utc::now(),
        })
    }

    /// Rebuild a comment from stored fields (no validation; storage is trusted).
    pub fn from_parts(
        id: CommentId,
        user_id: UserId,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            body,
            created_at,
        }
    }

    pub fn id_typed(&self) -> CommentId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Comment {
    type Id = CommentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
