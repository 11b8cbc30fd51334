//! In-memory quote retention using moka
//!
//! Issued quotes are kept for their validity window so a booking can
//! redeem the quoted fare by request id.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::pricing::calculators::ESTIMATE_VALIDITY_MINUTES;
use crate::pricing::responses::QuoteResponse;

/// Issued quotes (request_id -> QuoteResponse)
#[derive(Clone)]
pub struct QuoteCache {
    quotes: Cache<String, Arc<QuoteResponse>>,
}

impl QuoteCache {
    /// Create a cache whose entries live no longer than a quote is valid
    pub fn new(max_capacity: u64) -> Self {
        Self {
            quotes: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(Duration::from_secs(ESTIMATE_VALIDITY_MINUTES as u64 * 60))
                .build(),
        }
    }

    pub async fn insert(&self, quote: Arc<QuoteResponse>) {
        self.quotes.insert(quote.request_id.clone(), quote).await;
    }

    /// Get a quote whose `valid_until` is still ahead of `now`
    pub async fn get_valid(&self, request_id: &str, now: DateTime<Utc>) -> Option<Arc<QuoteResponse>> {
        let quote = self.quotes.get(request_id).await?;
        if quote.estimate.valid_until <= now {
            debug!("Quote {} expired at {}", request_id, quote.estimate.valid_until);
            self.quotes.invalidate(request_id).await;
            return None;
        }
        Some(quote)
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotes: self.quotes.entry_count(),
        }
    }

    /// Flush pending maintenance so `stats` reflects recent writes
    pub async fn run_pending_tasks(&self) {
        self.quotes.run_pending_tasks().await;
    }

    /// Invalidate all quotes
    pub fn invalidate_all(&self) {
        self.quotes.invalidate_all();
        info!("All cached quotes invalidated");
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotes: u64,
}
