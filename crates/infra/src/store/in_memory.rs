//! In-memory stores for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use siteboard_comments::Comment;
use siteboard_core::{AppError, CommentId, Entity, UserId};
use siteboard_users::User;

use super::{CommentStore, UserStore};

/// Generic entity table backed by a `RwLock<HashMap>`.
///
/// Lock poisoning is the only failure mode and surfaces as a traced error.
struct InMemoryTable<E: Entity> {
    name: &'static str,
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E> InMemoryTable<E>
where
    E: Entity + Clone,
{
    fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, entity: E) -> Result<(), AppError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AppError::traced(format!("{} table lock poisoned", self.name)))?;
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, AppError> {
        let map = self
            .inner
            .read()
            .map_err(|_| AppError::traced(format!("{} table lock poisoned", self.name)))?;
        Ok(map.get(id).cloned())
    }

    fn values(&self) -> Result<Vec<E>, AppError> {
        let map = self
            .inner
            .read()
            .map_err(|_| AppError::traced(format!("{} table lock poisoned", self.name)))?;
        Ok(map.values().cloned().collect())
    }

    fn remove(&self, id: &E::Id) -> Result<bool, AppError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AppError::traced(format!("{} table lock poisoned", self.name)))?;
        Ok(map.remove(id).is_some())
    }

    fn retain(&self, keep: impl Fn(&E) -> bool) -> Result<usize, AppError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AppError::traced(format!("{} table lock poisoned", self.name)))?;
        let before = map.len();
        map.retain(|_, v| keep(v));
        Ok(before - map.len())
    }
}

/// In-memory user store.
pub struct InMemoryUserStore {
    table: InMemoryTable<User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: InMemoryTable::new("users"),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> Result<(), AppError> {
        self.table.insert(user)
    }

    fn get(&self, id: UserId) -> Result<Option<User>, AppError> {
        self.table.get(&id)
    }

    fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.table.values()?;
        users.sort_by_key(|u| u.created_at());
        Ok(users)
    }

    fn update(&self, user: User) -> Result<(), AppError> {
        self.table.insert(user)
    }

    fn delete(&self, id: UserId) -> Result<bool, AppError> {
        self.table.remove(&id)
    }
}

/// In-memory comment store.
pub struct InMemoryCommentStore {
    table: InMemoryTable<Comment>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self {
            table: InMemoryTable::new("comments"),
        }
    }
}

impl Default for InMemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStore for InMemoryCommentStore {
    fn insert(&self, comment: Comment) -> Result<(), AppError> {
        self.table.insert(comment)
    }

    fn get(&self, id: CommentId) -> Result<Option<Comment>, AppError> {
        self.table.get(&id)
    }

    fn list(&self) -> Result<Vec<Comment>, AppError> {
        let mut comments = self.table.values()?;
        comments.sort_by_key(|c| c.created_at());
        Ok(comments)
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, AppError> {
        let mut comments = self.table.values()?;
        comments.retain(|c| c.user_id() == user_id);
        comments.sort_by_key(|c| c.created_at());
        Ok(comments)
    }

    fn delete(&self, id: CommentId) -> Result<bool, AppError> {
        self.table.remove(&id)
    }

    fn delete_by_user(&self, user_id: UserId) -> Result<usize, AppError> {
        self.table.retain(|c| c.user_id() != user_id)
    }
}
