//! Redis-backed datasource.
//!
//! Layout:
//! - `user:{id}` holds the JSON-encoded [`User`].
//! - `users:name:{name}` is a list of ids in insertion order, used for
//!   name lookups.
//!
//! Writes that touch both keys run in a `MULTI`/`EXEC` pipeline so a record
//! and its index entry appear and disappear together.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{self, PooledConnection, RunError};
use bb8_redis::redis::{self, AsyncCommands, RedisError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{AddedUser, DatasourceError, UserDatasource};
use crate::domain::{NewUser, User, UserFilter, UserId};

type RedisPool = bb8::Pool<RedisConnectionManager>;

fn record_key(id: &str) -> String {
    format!("user:{id}")
}

fn name_index_key(name: &str) -> String {
    format!("users:name:{name}")
}

fn map_pool_error(err: RunError<RedisError>) -> DatasourceError {
    DatasourceError::connection(err.to_string())
}

fn map_redis_error(err: RedisError) -> DatasourceError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        DatasourceError::connection(err.to_string())
    } else {
        DatasourceError::query(err.to_string())
    }
}

fn decode_user(raw: &str) -> Result<User, DatasourceError> {
    serde_json::from_str(raw)
        .map_err(|err| DatasourceError::query(format!("malformed user record: {err}")))
}

fn encode_user(user: &User) -> Result<String, DatasourceError> {
    serde_json::to_string(user)
        .map_err(|err| DatasourceError::query(format!("failed to encode user record: {err}")))
}

async fn load_record(
    conn: &mut PooledConnection<'_, RedisConnectionManager>,
    id: &str,
) -> Result<Option<User>, DatasourceError> {
    let raw: Option<String> = conn.get(record_key(id)).await.map_err(map_redis_error)?;
    raw.as_deref().map(decode_user).transpose()
}

async fn prune_stale(
    conn: &mut PooledConnection<'_, RedisConnectionManager>,
    index_key: &str,
    stale: &[String],
) {
    for id in stale {
        let result: Result<(), RedisError> = conn.lrem(index_key, 0, id).await;
        match result {
            Ok(()) => debug!(%id, index_key, "pruned dangling index entry"),
            Err(error) => warn!(%id, index_key, %error, "failed to prune dangling index entry"),
        }
    }
}

/// Walks a name index page by page until `limit` live records are found or
/// the index is exhausted.
///
/// Ids whose record is gone are skipped and remembered so they can be
/// pruned; the next page then reads further to make up the shortfall.
#[derive(Debug)]
struct PageCollector {
    limit: Option<usize>,
    next_start: usize,
    users: Vec<User>,
    stale: Vec<String>,
}

impl PageCollector {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            next_start: 0,
            users: Vec::new(),
            stale: Vec::new(),
        }
    }

    /// Records still wanted, or `None` when unbounded.
    fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.users.len()))
    }

    /// Inclusive `LRANGE` bounds of the next page (`-1` reads to the end).
    fn window(&self) -> (isize, isize) {
        let start = isize::try_from(self.next_start).unwrap_or(isize::MAX);
        let stop = self.remaining().map_or(-1, |remaining| {
            let span = isize::try_from(remaining).unwrap_or(isize::MAX);
            start.saturating_add(span).saturating_sub(1)
        });
        (start, stop)
    }

    /// Take one page of `(id, record)` pairs. Returns whether another page
    /// should be read.
    fn absorb(&mut self, page: Vec<(String, Option<User>)>) -> bool {
        let requested = self.remaining();
        let fetched = page.len();
        for (id, record) in page {
            match record {
                Some(user) => self.users.push(user),
                None => {
                    warn!(%id, "name index references a missing user record");
                    self.stale.push(id);
                }
            }
        }
        self.next_start = self.next_start.saturating_add(fetched);
        let exhausted = requested.is_none_or(|wanted| fetched < wanted);
        let full = self.remaining() == Some(0);
        !(exhausted || full)
    }
}

/// Datasource storing users in Redis through a `bb8` connection pool.
#[derive(Clone)]
pub struct RedisUserDatasource {
    pool: RedisPool,
}

impl RedisUserDatasource {
    /// Build a pool against `url` (for example `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    /// Returns [`DatasourceError::Connection`] when the URL is invalid. The
    /// pool connects lazily, so an unreachable server surfaces on the first
    /// request as a connection error.
    pub async fn connect(url: &str) -> Result<Self, DatasourceError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| DatasourceError::connection(format!("invalid redis url: {err}")))?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|err| DatasourceError::connection(err.to_string()))?;
        debug!("redis datasource pool ready");
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, DatasourceError> {
        self.pool.get().await.map_err(map_pool_error)
    }
}

#[async_trait]
impl UserDatasource for RedisUserDatasource {
    async fn get(&self, filter: &UserFilter) -> Result<User, DatasourceError> {
        let users = self.get_users(filter, Some(1)).await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| DatasourceError::not_found(filter.name.as_str()))
    }

    async fn get_users(
        &self,
        filter: &UserFilter,
        limit: Option<usize>,
    ) -> Result<Vec<User>, DatasourceError> {
        if limit == Some(0) {
            return Ok(Vec::new());
        }
        let index_key = name_index_key(&filter.name);
        let mut conn = self.connection().await?;
        let mut collector = PageCollector::new(limit);
        loop {
            let (start, stop) = collector.window();
            let ids: Vec<String> = conn
                .lrange(&index_key, start, stop)
                .await
                .map_err(map_redis_error)?;
            let mut page = Vec::with_capacity(ids.len());
            for id in ids {
                let record = load_record(&mut conn, &id).await?;
                page.push((id, record));
            }
            if !collector.absorb(page) {
                break;
            }
        }
        prune_stale(&mut conn, &index_key, &collector.stale).await;

        if collector.users.is_empty() {
            return Err(DatasourceError::not_found(filter.name.as_str()));
        }
        Ok(collector.users)
    }

    async fn add(&self, user: &NewUser) -> Result<AddedUser, DatasourceError> {
        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| DatasourceError::query(err.to_string()))?;
        let record = User::from_new(id.clone(), user.clone());
        let encoded = encode_user(&record)?;

        let mut conn = self.connection().await?;
        let () = redis::pipe()
            .atomic()
            .set(record_key(id.as_ref()), encoded)
            .ignore()
            .rpush(name_index_key(&record.name), id.as_ref())
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        debug!(%id, "user stored in redis");
        Ok(AddedUser { id })
    }

    async fn remove(&self, id: &UserId) -> Result<String, DatasourceError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(record_key(id.as_ref()))
            .await
            .map_err(map_redis_error)?;
        let Some(raw) = raw else {
            debug!(%id, "remove requested for unknown id");
            return Ok(format!("Removed {id}"));
        };
        let user = decode_user(&raw)?;

        let () = redis::pipe()
            .atomic()
            .del(record_key(id.as_ref()))
            .ignore()
            .lrem(name_index_key(&user.name), 0, id.as_ref())
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(format!("Removed {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use rstest::rstest;

    #[rstest]
    fn keys_are_namespaced() {
        assert_eq!(record_key("abc"), "user:abc");
        assert_eq!(name_index_key("Patrick"), "users:name:Patrick");
    }

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id).expect("id"),
            name: "Patrick".into(),
            email: "patrick@example.com".into(),
            address: "1 Main Street".into(),
            role: Role::from(true),
        }
    }

    /// Drive a collector over an in-memory index the way `get_users` drives
    /// it over `LRANGE`, returning the windows it asked for.
    fn collect(
        collector: &mut PageCollector,
        index: &[&str],
        live: &[&str],
    ) -> Vec<(isize, isize)> {
        let mut windows = Vec::new();
        loop {
            let (start, stop) = collector.window();
            windows.push((start, stop));
            let from = usize::try_from(start).expect("start");
            let to = if stop < 0 {
                index.len()
            } else {
                (usize::try_from(stop).expect("stop") + 1).min(index.len())
            };
            let page = index
                .get(from..to)
                .unwrap_or_default()
                .iter()
                .map(|id| {
                    let record = live.contains(id).then(|| user(id));
                    ((*id).to_owned(), record)
                })
                .collect();
            if !collector.absorb(page) {
                break;
            }
        }
        windows
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|user| user.id.as_ref()).collect()
    }

    #[rstest]
    #[case(None, (0, -1))]
    #[case(Some(1), (0, 0))]
    #[case(Some(15), (0, 14))]
    fn first_window_follows_limit(#[case] limit: Option<usize>, #[case] expected: (isize, isize)) {
        assert_eq!(PageCollector::new(limit).window(), expected);
    }

    #[rstest]
    fn stale_entries_do_not_shorten_a_bounded_page() {
        let mut collector = PageCollector::new(Some(3));
        let windows = collect(&mut collector, &["a", "gone", "b", "c", "d"], &["a", "b", "c", "d"]);

        assert_eq!(ids(&collector.users), ["a", "b", "c"]);
        assert_eq!(collector.stale, ["gone"]);
        assert_eq!(windows, [(0, 2), (3, 3)]);
    }

    #[rstest]
    fn short_index_stops_after_one_page() {
        let mut collector = PageCollector::new(Some(5));
        let windows = collect(&mut collector, &["a", "b"], &["a", "b"]);

        assert_eq!(ids(&collector.users), ["a", "b"]);
        assert!(collector.stale.is_empty());
        assert_eq!(windows, [(0, 4)]);
    }

    #[rstest]
    fn unbounded_reads_whole_index_once() {
        let mut collector = PageCollector::new(None);
        let windows = collect(&mut collector, &["a", "gone", "b"], &["a", "b"]);

        assert_eq!(ids(&collector.users), ["a", "b"]);
        assert_eq!(collector.stale, ["gone"]);
        assert_eq!(windows, [(0, -1)]);
    }

    #[rstest]
    fn all_stale_index_yields_nothing() {
        let mut collector = PageCollector::new(Some(2));
        collect(&mut collector, &["x", "y", "z"], &[]);

        assert!(collector.users.is_empty());
        assert_eq!(collector.stale, ["x", "y", "z"]);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_url_is_a_connection_error() {
        let result = RedisUserDatasource::connect("not a url").await;
        assert!(matches!(result, Err(DatasourceError::Connection { .. })));
    }

    #[rstest]
    fn records_round_trip_through_json() {
        let user = user("abc");
        let encoded = encode_user(&user).expect("encode");
        assert_eq!(decode_user(&encoded).expect("decode"), user);
    }

    #[rstest]
    fn malformed_records_are_query_errors() {
        let err = decode_user("{not json").expect_err("malformed");
        assert!(matches!(err, DatasourceError::Query { .. }));
    }
}
