//! In-memory storage behind the reference API.
//!
//! Identifiers are assigned from per-collection counters starting at 1 and are never reused,
//! even after a delete.

use dengue_core::validation::{validate_email, validate_required, validate_username};
use dengue_core::{CoreError, NotificationRecord, User, UserPatch};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Invalid(String),
    #[error("Notificação com ID {0} não encontrada")]
    NotificationNotFound(i64),
    #[error("Usuário com ID {0} não encontrado")]
    UserNotFound(i64),
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => StoreError::Invalid(msg),
            CoreError::MissingRequired(fields) => StoreError::Invalid(format!(
                "Campos obrigatórios ausentes: {}",
                fields.join(", ")
            )),
            other => StoreError::Invalid(other.to_string()),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Default)]
struct Inner {
    notifications: BTreeMap<i64, NotificationRecord>,
    users: BTreeMap<i64, User>,
    last_notification_id: i64,
    last_user_id: i64,
}

/// Notification and user collections guarded by one lock.
#[derive(Default)]
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_notifications(&self) -> Vec<NotificationRecord> {
        self.lock().notifications.values().cloned().collect()
    }

    pub fn notification(&self, id: i64) -> StoreResult<NotificationRecord> {
        self.lock()
            .notifications
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotificationNotFound(id))
    }

    /// Store a new notification under a fresh id. Any client-supplied id is ignored.
    pub fn create_notification(&self, mut record: NotificationRecord) -> StoreResult<NotificationRecord> {
        validate_required(&record)?;

        let mut inner = self.lock();
        inner.last_notification_id += 1;
        let id = inner.last_notification_id;
        record.id = Some(id);
        inner.notifications.insert(id, record.clone());
        tracing::info!("created notification {id}");
        Ok(record)
    }

    /// Replace the notification stored under `id`.
    pub fn update_notification(
        &self,
        id: i64,
        mut record: NotificationRecord,
    ) -> StoreResult<NotificationRecord> {
        validate_required(&record)?;

        let mut inner = self.lock();
        let slot = inner
            .notifications
            .get_mut(&id)
            .ok_or(StoreError::NotificationNotFound(id))?;
        record.id = Some(id);
        *slot = record.clone();
        Ok(record)
    }

    pub fn delete_notification(&self, id: i64) -> StoreResult<()> {
        self.lock()
            .notifications
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotificationNotFound(id))
    }

    pub fn list_users(&self) -> Vec<User> {
        self.lock().users.values().cloned().collect()
    }

    pub fn user(&self, id: i64) -> StoreResult<User> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    /// Create a user; both members are mandatory and must be unique.
    pub fn create_user(&self, data: UserPatch) -> StoreResult<User> {
        let username = data
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| StoreError::Invalid("Nome de usuário é obrigatório".into()))?;
        let email = data
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| StoreError::Invalid("Email é obrigatório".into()))?;
        validate_username(&username)?;
        validate_email(&email)?;

        let mut inner = self.lock();
        ensure_unique(&inner, None, Some(&username), Some(&email))?;

        inner.last_user_id += 1;
        let id = inner.last_user_id;
        let user = User {
            id: Some(id),
            username,
            email,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    /// Apply the members present in `patch` to the user stored under `id`.
    pub fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<User> {
        if let Some(username) = &patch.username {
            validate_username(username)?;
        }
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }

        let mut inner = self.lock();
        if !inner.users.contains_key(&id) {
            return Err(StoreError::UserNotFound(id));
        }
        ensure_unique(
            &inner,
            Some(id),
            patch.username.as_deref(),
            patch.email.as_deref(),
        )?;

        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    pub fn delete_user(&self, id: i64) -> StoreResult<()> {
        self.lock()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::UserNotFound(id))
    }
}

fn other_users(inner: &Inner, except: Option<i64>) -> impl Iterator<Item = &User> + '_ {
    inner
        .users
        .iter()
        .filter(move |(id, _)| Some(**id) != except)
        .map(|(_, user)| user)
}

fn ensure_unique(
    inner: &Inner,
    except: Option<i64>,
    username: Option<&str>,
    email: Option<&str>,
) -> StoreResult<()> {
    // Usernames are checked across every user before any email.
    if let Some(taken) =
        other_users(inner, except).find(|user| username == Some(user.username.as_str()))
    {
        return Err(StoreError::Invalid(format!(
            "Nome de usuário '{}' já existe",
            taken.username
        )));
    }
    if let Some(taken) =
        other_users(inner, except).find(|user| email == Some(user.email.as_str()))
    {
        return Err(StoreError::Invalid(format!(
            "Email '{}' já está em uso",
            taken.email
        )));
    }
    Ok(())
}
