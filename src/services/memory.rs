//! Memory Backend
//!
//! In-process implementation of [`DataService`] and [`AuthService`]. Used by
//! the demo binary and the tests; supports artificial latency and injected
//! failures so error paths and late resolutions can be exercised.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ahash::{AHashMap, AHashSet};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::auth::{AuthService, SignUp, Subscription};
use super::collection::{Collection, Query, Record};
use super::data::DataService;
use crate::constants::MIN_PASSWORD_LEN;
use crate::domain::session::{AuthSession, AuthUser};
use crate::error::{Error, Result};

/// Data operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Insert,
    Update,
    Upsert,
}

type Listener = Arc<dyn Fn(Option<AuthSession>) + Send + Sync>;

struct StoredUser {
    user: AuthUser,
    password: String,
}

#[derive(Default)]
struct Store {
    tables: AHashMap<Collection, Vec<Record>>,
    users: Vec<StoredUser>,
    session: Option<AuthSession>,
    failures: AHashSet<(Collection, Operation)>,
}

/// In-memory backend
#[derive(Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
    listeners: Arc<Mutex<Vec<(u64, Listener)>>>,
    next_listener: AtomicU64,
    latency: Option<Duration>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every async operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    // ==================== Fixtures ====================

    /// Register an auth user directly
    pub fn add_user(&self, email: &str, password: &str, full_name: Option<&str>) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
            full_name: full_name.map(str::to_string),
        };
        self.store().users.push(StoredUser {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Insert rows with server defaults, bypassing injected failures
    pub fn seed(&self, collection: Collection, rows: impl IntoIterator<Item = Record>) {
        let mut store = self.store();
        let table = store.tables.entry(collection).or_default();
        for row in rows {
            table.push(with_defaults(collection, row));
        }
    }

    /// Snapshot of a collection
    pub fn rows(&self, collection: Collection) -> Vec<Record> {
        self.store()
            .tables
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Make `operation` on `collection` fail until cleared
    pub fn fail_on(&self, collection: Collection, operation: Operation) {
        self.store().failures.insert((collection, operation));
    }

    pub fn clear_failures(&self) {
        self.store().failures.clear();
    }

    /// Number of live session listeners
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    // ==================== Internals ====================

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn emit(&self, session: Option<AuthSession>) {
        let listeners: Vec<Listener> = self.listeners().iter().map(|(_, l)| l.clone()).collect();
        tracing::debug!(
            listeners = listeners.len(),
            signed_in = session.is_some(),
            "session change"
        );
        for listener in listeners {
            listener(session.clone());
        }
    }
}

fn check(store: &Store, collection: Collection, operation: Operation) -> Result<()> {
    if store.failures.contains(&(collection, operation)) {
        return Err(Error::remote(
            collection.name(),
            format!("{operation:?} on {collection} failed"),
        ));
    }
    Ok(())
}

/// Server-side column defaults
fn with_defaults(collection: Collection, mut row: Record) -> Record {
    if collection.primary_key() == "id" && row.get("id").is_none_or(Value::is_null) {
        row.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    }
    if collection != Collection::RequestTeams && !row.contains_key("created_at") {
        row.insert("created_at".into(), Value::String(Utc::now().to_rfc3339()));
    }
    match collection {
        Collection::Requests if !row.contains_key("status") => {
            row.insert("status".into(), Value::String("submitted".into()));
        }
        Collection::RequestTypes if !row.contains_key("active") => {
            row.insert("active".into(), Value::Bool(true));
        }
        _ => {}
    }
    row
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.unwrap_or(&Value::Null), b.unwrap_or(&Value::Null)) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}

fn merge(target: &mut Record, patch: &Record) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

impl DataService for MemoryBackend {
    async fn list(&self, collection: Collection, query: &Query) -> Result<Vec<Record>> {
        self.delay().await;
        let store = self.store();
        check(&store, collection, Operation::List)?;

        let mut rows: Vec<Record> = store
            .tables
            .get(&collection)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending { ordering } else { ordering.reverse() }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Record> {
        self.delay().await;
        let store = self.store();
        check(&store, collection, Operation::Get)?;

        let key = collection.primary_key();
        store
            .tables
            .get(&collection)
            .and_then(|rows| rows.iter().find(|r| r.get(key).and_then(Value::as_str) == Some(id)))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                collection: collection.name().to_string(),
                id: id.to_string(),
            })
    }

    async fn insert(&self, collection: Collection, row: Record) -> Result<Record> {
        self.delay().await;
        let mut store = self.store();
        check(&store, collection, Operation::Insert)?;

        let row = with_defaults(collection, row);
        let key = collection.primary_key();
        let table = store.tables.entry(collection).or_default();
        let duplicate = collection != Collection::UserRoles
            && row
                .get(key)
                .is_some_and(|id| table.iter().any(|r| r.get(key) == Some(id)));
        if duplicate {
            return Err(Error::remote(
                collection.name(),
                format!("duplicate key value violates unique constraint \"{collection}_pkey\""),
            ));
        }
        table.push(row.clone());
        Ok(row)
    }

    async fn update(&self, collection: Collection, id: &str, patch: Record) -> Result<Record> {
        self.delay().await;
        let mut store = self.store();
        check(&store, collection, Operation::Update)?;

        let key = collection.primary_key();
        let mut updated = None;
        for row in store.tables.entry(collection).or_default().iter_mut() {
            if row.get(key).and_then(Value::as_str) == Some(id) {
                merge(row, &patch);
                updated.get_or_insert_with(|| row.clone());
            }
        }
        updated.ok_or_else(|| Error::NotFound {
            collection: collection.name().to_string(),
            id: id.to_string(),
        })
    }

    async fn upsert(
        &self,
        collection: Collection,
        row: Record,
        conflict_key: &str,
    ) -> Result<Record> {
        self.delay().await;
        let mut store = self.store();
        check(&store, collection, Operation::Upsert)?;

        let conflict = row.get(conflict_key).cloned().unwrap_or(Value::Null);
        let table = store.tables.entry(collection).or_default();
        let mut merged = None;
        for existing in table.iter_mut() {
            if !conflict.is_null() && existing.get(conflict_key) == Some(&conflict) {
                merge(existing, &row);
                merged.get_or_insert_with(|| existing.clone());
            }
        }
        match merged {
            Some(row) => Ok(row),
            None => {
                let row = with_defaults(collection, row);
                table.push(row.clone());
                Ok(row)
            }
        }
    }
}

impl AuthService for MemoryBackend {
    async fn get_session(&self) -> Result<Option<AuthSession>> {
        self.delay().await;
        Ok(self.store().session.clone())
    }

    fn on_session_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<AuthSession>) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, AtomicOrdering::Relaxed);
        self.listeners().push((id, Arc::new(callback)));

        let listeners = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.delay().await;
        let session = {
            let mut store = self.store();
            let user = store
                .users
                .iter()
                .find(|u| {
                    u.password == password
                        && u.user.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email))
                })
                .map(|u| u.user.clone())
                .ok_or_else(|| Error::auth("Invalid login credentials"))?;
            let session = AuthSession {
                user,
                access_token: Uuid::now_v7().to_string(),
            };
            store.session = Some(session.clone());
            session
        };
        self.emit(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUp) -> Result<AuthUser> {
        self.delay().await;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::auth(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        let exists = self.store().users.iter().any(|u| {
            u.user
                .email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(&request.email))
        });
        if exists {
            return Err(Error::auth("User already registered"));
        }
        Ok(self.add_user(&request.email, &request.password, Some(&request.full_name)))
    }

    async fn sign_out(&self) -> Result<()> {
        self.delay().await;
        self.store().session = None;
        self.emit(None);
        Ok(())
    }

    async fn update_password(&self, password: &str) -> Result<()> {
        self.delay().await;
        let session = {
            let mut store = self.store();
            let session = store
                .session
                .clone()
                .ok_or_else(|| Error::auth("Auth session missing!"))?;
            if let Some(stored) = store.users.iter_mut().find(|u| u.user.id == session.user.id) {
                stored.password = password.to_string();
            }
            session
        };
        self.emit(Some(session));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::collection::to_record;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    #[tokio::test]
    async fn list_filters_orders_and_limits() {
        let backend = MemoryBackend::new();
        backend.seed(
            Collection::Requests,
            [
                record(json!({
                    "title": "b",
                    "requester_id": "u1",
                    "created_at": "2024-01-02T00:00:00Z"
                })),
                record(json!({
                    "title": "a",
                    "requester_id": "u2",
                    "created_at": "2024-01-01T00:00:00Z"
                })),
                record(json!({
                    "title": "c",
                    "requester_id": "u1",
                    "created_at": "2024-01-03T00:00:00Z"
                })),
            ],
        );
        let query = Query::new()
            .eq("requester_id", "u1")
            .order_by("created_at", false)
            .limit(1);
        let rows = backend.list(Collection::Requests, &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "c");
        assert_eq!(rows[0]["status"], "submitted");
    }

    #[tokio::test]
    async fn insert_fills_defaults_and_rejects_duplicates() {
        let backend = MemoryBackend::new();
        let row = backend
            .insert(Collection::RequestTypes, record(json!({"name": "Laptop"})))
            .await
            .unwrap();
        assert_eq!(row["active"], true);
        assert!(row["id"].is_string());

        let again = backend.insert(Collection::RequestTypes, row).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn upsert_merges_on_conflict_key() {
        let backend = MemoryBackend::new();
        let first = to_record(&json!({"user_id": "u1", "role": "requester"})).unwrap();
        backend.upsert(Collection::UserRoles, first, "user_id").await.unwrap();
        let second = to_record(&json!({"user_id": "u1", "role": "admin"})).unwrap();
        let merged = backend.upsert(Collection::UserRoles, second, "user_id").await.unwrap();
        assert_eq!(merged["role"], "admin");
        assert_eq!(backend.rows(Collection::UserRoles).len(), 1);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.get(Collection::Requests, "nope").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        let err = backend
            .update(Collection::Requests, "nope", Record::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn injected_failures_leave_rows_untouched() {
        let backend = MemoryBackend::new();
        backend.seed(Collection::RequestTeams, [record(json!({"key": "it", "name": "IT"}))]);
        backend.fail_on(Collection::RequestTeams, Operation::Update);
        let patch = record(json!({"name": "Changed"}));
        assert!(backend.update(Collection::RequestTeams, "it", patch).await.is_err());
        assert_eq!(backend.rows(Collection::RequestTeams)[0]["name"], "IT");

        backend.clear_failures();
        let patch = record(json!({"name": "Changed"}));
        assert!(backend.update(Collection::RequestTeams, "it", patch).await.is_ok());
    }

    #[tokio::test]
    async fn sign_in_notifies_listeners_until_released() {
        let backend = MemoryBackend::new();
        backend.add_user("ada@example.com", "secret1", Some("Ada"));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = backend.on_session_change(move |session| {
            sink.lock().unwrap().push(session.is_some());
        });
        assert_eq!(backend.listener_count(), 1);

        assert!(backend.sign_in("ada@example.com", "wrong").await.is_err());
        backend.sign_in("ADA@example.com", "secret1").await.unwrap();
        assert!(backend.get_session().await.unwrap().is_some());

        drop(subscription);
        assert_eq!(backend.listener_count(), 0);
        backend.sign_out().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![true]);
        assert!(backend.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_up_rejects_duplicates_and_short_passwords() {
        let backend = MemoryBackend::new();
        let request = SignUp {
            email: "new@example.com".into(),
            password: "secret1".into(),
            full_name: "New User".into(),
        };
        let user = backend.sign_up(&request).await.unwrap();
        assert_eq!(user.full_name.as_deref(), Some("New User"));
        assert!(backend.sign_up(&request).await.is_err());

        let short = SignUp {
            password: "abc".into(),
            email: "other@example.com".into(),
            ..request
        };
        assert!(backend.sign_up(&short).await.is_err());
    }

    #[tokio::test]
    async fn update_password_requires_a_session() {
        let backend = MemoryBackend::new();
        backend.add_user("a@example.com", "secret1", None);
        assert!(backend.update_password("another").await.is_err());
        backend.sign_in("a@example.com", "secret1").await.unwrap();
        backend.update_password("another").await.unwrap();
        backend.sign_out().await.unwrap();
        assert!(backend.sign_in("a@example.com", "another").await.is_ok());
    }
}
