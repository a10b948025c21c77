use chrono::NaiveDate;
use drill_planner::catalog::{CatalogError, DrillCatalog, DrillImporter};
use drill_planner::planning::DrillCandidate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local drill catalog loaded from disk at startup; read-only afterwards.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDrillCatalog {
    drills: Arc<Vec<DrillCandidate>>,
}

impl InMemoryDrillCatalog {
    pub(crate) fn new(drills: Vec<DrillCandidate>) -> Self {
        Self {
            drills: Arc::new(drills),
        }
    }

    /// Loads a catalog file or directory; a missing path yields an empty catalog.
    pub(crate) fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            warn!(path = %path.display(), "drill catalog path not found, starting empty");
            return Ok(Self::default());
        }

        let drills = DrillImporter::load(path)?;
        info!(path = %path.display(), drills = drills.len(), "drill catalog loaded");
        Ok(Self::new(drills))
    }

    pub(crate) fn len(&self) -> usize {
        self.drills.len()
    }
}

impl DrillCatalog for InMemoryDrillCatalog {
    fn all_drills(&self) -> Result<Vec<DrillCandidate>, CatalogError> {
        Ok(self.drills.as_ref().clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
