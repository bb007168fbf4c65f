use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use moka::future::Cache;
use tracing::debug;

use crate::engine::{growth_from_file, EngineError};
use crate::models::GrowthPoint;
use crate::transform::GrowthAggregator;
use crate::types::{GrowthMeasure, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrowthKey {
    path: PathBuf,
    modified: SystemTime,
    measure: GrowthMeasure,
    order: SortOrder
}

/// Shared state of the dashboard: where the report lives and memoized growth series.
///
/// A cached series is only reused while the report file keeps the same modification time.
pub struct DashboardState {
    pub report_path: PathBuf,
    pub aggregator: GrowthAggregator,
    pub title: String,
    pub(crate) cache: Cache<GrowthKey, Arc<Vec<GrowthPoint>>>
}

impl DashboardState {
    pub fn new(report_path: PathBuf, aggregator: GrowthAggregator, title: String, capacity: u64, ttl: Duration) -> Self {
        Self {
            report_path,
            aggregator,
            title,
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build()
        }
    }

    pub async fn growth(&self, aggregator: GrowthAggregator) -> Result<Arc<Vec<GrowthPoint>>, Arc<EngineError>> {
        let modified = tokio::fs::metadata(&self.report_path).await
            .and_then(|metadata| metadata.modified());

        let Ok(modified) = modified else {
            return growth_from_file(&self.report_path, aggregator).await
                .map(Arc::new)
                .map_err(Arc::new);
        };

        let key = GrowthKey {
            path: self.report_path.clone(),
            modified,
            measure: aggregator.measure(),
            order: aggregator.order()
        };

        self.cache
            .try_get_with(key, async {
                debug!("Growth cache miss for {}", self.report_path.display());
                growth_from_file(&self.report_path, aggregator).await.map(Arc::new)
            })
            .await
    }
}
