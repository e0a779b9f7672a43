use crate::domain::category::CategorySet;
use crate::domain::poi::{Poi, PoiRepository, Position};
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

/// One entry of the POI catalog file
#[derive(Debug, Clone, Deserialize)]
pub struct PoiRecord {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub categories: CategorySet,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_facts: Vec<String>,
    #[serde(default)]
    pub facts: Option<Vec<String>>,
}

impl From<PoiRecord> for Poi {
    fn from(record: PoiRecord) -> Self {
        let mut poi = Poi::new(
            record.id,
            record.name,
            Position {
                x: record.x,
                y: record.y,
            },
            record.categories,
        )
        .with_short_description(record.description)
        .with_source_facts(record.source_facts);
        poi.facts = record.facts;
        poi
    }
}

/// POI catalog held in memory, seeded from a JSON file at startup.
/// Generated narratives live here for the lifetime of the process.
pub struct InMemoryPoiRepository {
    pois: RwLock<BTreeMap<i64, Poi>>,
}

impl InMemoryPoiRepository {
    pub fn new(pois: Vec<Poi>) -> anyhow::Result<Self> {
        let mut by_id = BTreeMap::new();
        for poi in pois {
            let id = poi.id;
            if by_id.insert(id, poi).is_some() {
                bail!("duplicate POI id {} in catalog", id);
            }
        }
        Ok(Self {
            pois: RwLock::new(by_id),
        })
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let records: Vec<PoiRecord> =
            serde_json::from_str(json).context("POI catalog is not a valid JSON array of POIs")?;
        Self::new(records.into_iter().map(Poi::from).collect())
    }

    /// Load the catalog file; a missing file gives an empty catalog
    pub fn from_catalog_file(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let repo = Self::from_json(&json)
                    .with_context(|| format!("failed to load POI catalog {}", path.display()))?;
                Ok(repo)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "POI catalog not found, starting with an empty catalog"
                );
                Self::new(Vec::new())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read POI catalog {}", path.display())),
        }
    }
}

#[async_trait]
impl PoiRepository for InMemoryPoiRepository {
    async fn find_all(&self) -> Vec<Poi> {
        self.pois.read().await.values().cloned().collect()
    }

    async fn find_by_id(&self, id: i64) -> Option<Poi> {
        self.pois.read().await.get(&id).cloned()
    }

    async fn count(&self) -> usize {
        self.pois.read().await.len()
    }

    async fn save_facts(&self, id: i64, narrative: String, facts: Vec<String>) -> Result<(), String> {
        let mut pois = self.pois.write().await;
        let poi = pois
            .get_mut(&id)
            .ok_or_else(|| format!("POI {} not found", id))?;
        poi.narrative = Some(narrative);
        poi.facts = Some(facts);
        Ok(())
    }
}
