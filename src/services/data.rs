//! Data Service
//!
//! Row-level access to the hosted collections. Implementations translate
//! [`Query`] into whatever the backend speaks.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::collection::{Collection, Query, Record, from_record, to_record};
use crate::error::Result;

/// Async access to the hosted collections
pub trait DataService: Send + Sync {
    /// Rows matching `query`
    fn list(
        &self,
        collection: Collection,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<Record>>> + Send;

    /// Exactly one row by primary key; `NotFound` otherwise
    fn get(&self, collection: Collection, id: &str) -> impl Future<Output = Result<Record>> + Send;

    /// Insert a row, returning it with server-side defaults filled in
    fn insert(
        &self,
        collection: Collection,
        row: Record,
    ) -> impl Future<Output = Result<Record>> + Send;

    /// Merge `patch` into the row with primary key `id`
    fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Record,
    ) -> impl Future<Output = Result<Record>> + Send;

    /// Insert, or merge into the row whose `conflict_key` column matches
    fn upsert(
        &self,
        collection: Collection,
        row: Record,
        conflict_key: &str,
    ) -> impl Future<Output = Result<Record>> + Send;
}

// ==================== Typed helpers ====================

pub async fn list_as<T, S>(service: &S, collection: Collection, query: &Query) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: DataService + ?Sized,
{
    service
        .list(collection, query)
        .await?
        .into_iter()
        .map(from_record)
        .collect()
}

/// First matching row, if any
pub async fn find_one<T, S>(service: &S, collection: Collection, query: Query) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: DataService + ?Sized,
{
    let mut rows = service.list(collection, &query.limit(1)).await?;
    match rows.pop() {
        Some(row) => from_record(row).map(Some),
        None => Ok(None),
    }
}

pub async fn get_as<T, S>(service: &S, collection: Collection, id: &str) -> Result<T>
where
    T: DeserializeOwned,
    S: DataService + ?Sized,
{
    from_record(service.get(collection, id).await?)
}

pub async fn insert_as<T, P, S>(service: &S, collection: Collection, payload: &P) -> Result<T>
where
    T: DeserializeOwned,
    P: Serialize,
    S: DataService + ?Sized,
{
    from_record(service.insert(collection, to_record(payload)?).await?)
}
