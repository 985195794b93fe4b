//! Store trait seams for the User and Comment resources.

use std::sync::Arc;

use siteboard_comments::Comment;
use siteboard_core::{AppError, CommentId, UserId};
use siteboard_users::User;

pub mod in_memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemoryCommentStore, InMemoryUserStore};

#[cfg(feature = "postgres")]
pub use postgres::{PostgresCommentStore, PostgresUserStore};

/// Storage for users.
///
/// Failures are infrastructure errors; the backtrace is captured where the
/// failure happened, not where it is reported.
pub trait UserStore: Send + Sync {
    fn insert(&self, user: User) -> Result<(), AppError>;
    fn get(&self, id: UserId) -> Result<Option<User>, AppError>;
    /// All users, oldest first.
    fn list(&self) -> Result<Vec<User>, AppError>;
    fn update(&self, user: User) -> Result<(), AppError>;
    /// Returns whether a user with that id existed.
    fn delete(&self, id: UserId) -> Result<bool, AppError>;
}

/// Storage for comments.
pub trait CommentStore: Send + Sync {
    fn insert(&self, comment: Comment) -> Result<(), AppError>;
    fn get(&self, id: CommentId) -> Result<Option<Comment>, AppError>;
    /// All comments, oldest first.
    fn list(&self) -> Result<Vec<Comment>, AppError>;
    /// One user's comments, oldest first.
    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, AppError>;
    /// Returns whether a comment with that id existed.
    fn delete(&self, id: CommentId) -> Result<bool, AppError>;
    /// Remove all of a user's comments; returns how many were removed.
    fn delete_by_user(&self, user_id: UserId) -> Result<usize, AppError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn insert(&self, user: User) -> Result<(), AppError> {
        (**self).insert(user)
    }

    fn get(&self, id: UserId) -> Result<Option<User>, AppError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<User>, AppError> {
        (**self).list()
    }

    fn update(&self, user: User) -> Result<(), AppError> {
        (**self).update(user)
    }

    fn delete(&self, id: UserId) -> Result<bool, AppError> {
        (**self).delete(id)
    }
}

impl<S> CommentStore for Arc<S>
where
    S: CommentStore + ?Sized,
{
    fn insert(&self, comment: Comment) -> Result<(), AppError> {
        (**self).insert(comment)
    }

    fn get(&self, id: CommentId) -> Result<Option<Comment>, AppError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Comment>, AppError> {
        (**self).list()
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, AppError> {
        (**self).list_by_user(user_id)
    }

    fn delete(&self, id: CommentId) -> Result<bool, AppError> {
        (**self).delete(id)
    }

    fn delete_by_user(&self, user_id: UserId) -> Result<usize, AppError> {
        (**self).delete_by_user(user_id)
    }
}
