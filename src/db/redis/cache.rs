use redis::{AsyncCommands, Client};
use std::fmt::Display;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{error::AppResult, models::PairingResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Generative pairing for a dish, keyed by the dish exactly as submitted
    Pairing(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Pairing(dish) => write!(f, "pairing:{}", dish),
        }
    }
}

/// Creates a Redis client for caching
///
/// Does not connect; connections are opened lazily per operation.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Work queued for the background writer
#[derive(Debug, PartialEq)]
enum CacheCommand {
    Store { key: String, json: String, ttl: u64 },
    Evict { key: String },
}

/// Redis store for generative pairing results
///
/// Reads go straight to Redis. Writes and evictions are queued to a background
/// task so a pairing response never waits on them.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    commands: mpsc::UnboundedSender<CacheCommand>,
}

/// Stops the background writer once its queue is drained
pub struct CacheWriterHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl CacheWriterHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Cache writer task panicked");
        }
    }
}

impl Cache {
    /// Creates the cache and spawns its writer task on the current runtime
    pub fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (commands, queue) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run_writer(redis_client.clone(), queue, shutdown_rx));

        let cache = Self {
            redis_client,
            commands,
        };
        (cache, CacheWriterHandle { shutdown_tx, task })
    }

    /// Looks up a stored pairing. Entries that no longer decode count as a
    /// miss and are evicted.
    pub async fn get_pairing(&self, key: &CacheKey) -> AppResult<Option<PairingResult>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(key.to_string()).await?;

        Ok(stored.and_then(|json| self.decode_or_evict(key, &json)))
    }

    /// Queues a pairing for storage with `ttl` seconds to live
    pub fn store_pairing(&self, key: &CacheKey, result: &PairingResult, ttl: u64) {
        match serde_json::to_string(result) {
            Ok(json) => self.enqueue(CacheCommand::Store {
                key: key.to_string(),
                json,
                ttl,
            }),
            Err(e) => tracing::error!(error = %e, key = %key, "Failed to encode pairing for cache"),
        }
    }

    fn decode_or_evict(&self, key: &CacheKey, json: &str) -> Option<PairingResult> {
        match serde_json::from_str(json) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Evicting undecodable cached pairing");
                self.enqueue(CacheCommand::Evict {
                    key: key.to_string(),
                });
                None
            }
        }
    }

    fn enqueue(&self, command: CacheCommand) {
        if self.commands.send(command).is_err() {
            tracing::error!("Cache writer is gone, dropping cache command");
        }
    }
}

async fn run_writer(
    client: Client,
    mut queue: mpsc::UnboundedReceiver<CacheCommand>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    tracing::info!("Cache writer started");

    loop {
        tokio::select! {
            command = queue.recv() => match command {
                Some(command) => apply_logged(&client, command).await,
                None => break,
            },
            _ = &mut shutdown_rx => {
                queue.close();
                let mut flushed = 0usize;
                while let Some(command) = queue.recv().await {
                    apply_logged(&client, command).await;
                    flushed += 1;
                }
                tracing::info!(flushed, "Cache writer drained");
                break;
            }
        }
    }

    tracing::info!("Cache writer stopped");
}

async fn apply_logged(client: &Client, command: CacheCommand) {
    if let Err(e) = apply(client, &command).await {
        tracing::error!(error = %e, command = ?command, "Cache command failed");
    }
}

async fn apply(client: &Client, command: &CacheCommand) -> AppResult<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    match command {
        CacheCommand::Store { key, json, ttl } => {
            let _: () = conn.set_ex(key, json, *ttl).await?;
        }
        CacheCommand::Evict { key } => {
            let _: () = conn.del(key).await?;
        }
    }
    Ok(())
}
