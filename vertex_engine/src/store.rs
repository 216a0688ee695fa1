//! Flat-file order persistence.
//!
//! Orders live in a single JSON file holding an array of records, rewritten wholesale on every
//! append. A missing or unparseable file reads as an empty list, never as an error. There is no
//! locking: concurrent writers last-write-win, which is acceptable at this system's load and is
//! called out in DESIGN.md.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::*;
use thiserror::Error;
use tokio::fs;

use crate::order_types::{NewOrder, Order, OrderStatus};

#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("Could not create the orders directory. {0}")]
    CreateDir(std::io::Error),
    #[error("Could not write the orders file. {0}")]
    Write(std::io::Error),
    #[error("Could not serialize orders. {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every persisted order. A missing file is a first run; a corrupt file is discarded
    /// with a warning, matching the append-anyway behaviour callers rely on.
    pub async fn load(&self) -> Vec<Order> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(orders) => orders,
                Err(e) => {
                    warn!("🗃️ The orders file at {} is not valid JSON; treating it as empty. {e}", self.path.display());
                    Vec::new()
                },
            },
            Err(_) => Vec::new(),
        }
    }

    /// Persist a validated order. Assigns the id (epoch milliseconds) and timestamps, then
    /// rewrites the whole file. Returns the stored record.
    pub async fn append(&self, new_order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut orders = self.load().await;
        let now = Utc::now();
        let order = Order {
            id: now.timestamp_millis().to_string(),
            details: new_order,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        orders.push(order.clone());
        self.rewrite(&orders).await?;
        info!("🗃️ Order #{} saved ({} orders on file)", order.id, orders.len());
        Ok(order)
    }

    /// Rewrite the file via a temp file in the same directory so a crash mid-write never leaves
    /// a truncated orders file behind.
    async fn rewrite(&self, orders: &[Order]) -> Result<(), OrderStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(OrderStoreError::CreateDir)?;
        }
        let json = serde_json::to_vec_pretty(orders)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await.map_err(OrderStoreError::Write)?;
        fs::rename(&tmp, &self.path).await.map_err(OrderStoreError::Write)?;
        Ok(())
    }
}
