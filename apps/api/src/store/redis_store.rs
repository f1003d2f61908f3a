use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::store::{from_entries, to_entries, StateStore, StoreError, ALL_KEYS};
use crate::workspace::models::PersistedState;

const KEY_PREFIX: &str = "rewriter:";

/// Keeps the three entries as plain Redis strings under `rewriter:<key>`.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_tokio_connection().await?;
        info!("Redis state store connected");
        Ok(Self { connection })
    }
}

fn namespaced(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Namespaced keys in `ALL_KEYS` order.
fn namespaced_keys() -> Vec<String> {
    ALL_KEYS.iter().map(|k| namespaced(k)).collect()
}

/// Maps MGET replies, ordered like `namespaced_keys`, back onto the entries.
fn from_values(values: Vec<Option<String>>) -> Result<PersistedState, StoreError> {
    let mut values = values.into_iter();
    let api_key = values.next().flatten();
    let resume = values.next().flatten();
    let job_descriptions = values.next().flatten();
    from_entries(api_key, resume, job_descriptions)
}

#[async_trait]
impl StateStore for RedisStore {
    async fn load(&self) -> Result<PersistedState, StoreError> {
        let mut conn = self.connection.clone();
        // One MGET so a load never mixes entries from two saves.
        let values: Vec<Option<String>> = conn.mget(namespaced_keys()).await?;
        from_values(values)
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in to_entries(state)? {
            pipe.set(namespaced(key), value).ignore();
        }
        pipe.query_async::<_, ()>(&mut conn).await?;
        debug!("State saved to Redis");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(namespaced_keys()).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
