pub mod error;
pub mod model;
pub mod service;

pub use error::{FailedAsset, PoiServiceError};
pub use model::{AssetKind, AudioKind, Poi, Position};
pub use service::{PoiService, PoiServiceApi};

use crate::domain::category::CategorySet;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage for POIs and the narrative text generated for them
#[async_trait]
pub trait PoiRepository: Send + Sync {
    async fn find_all(&self) -> Vec<Poi>;
    async fn find_by_id(&self, id: i64) -> Option<Poi>;
    async fn count(&self) -> usize;
    /// Cache generated narrative and the fact items derived from it
    async fn save_facts(&self, id: i64, narrative: String, facts: Vec<String>) -> Result<(), String>;
}

/// Search parameters for POIs around a position
#[derive(Debug, Clone)]
pub struct RelevanceQuery {
    pub x: f64,
    pub y: f64,
    pub interests: CategorySet,
    /// Only POIs within this distance
    pub radius: Option<f64>,
    /// Only POIs scoring at least this much
    pub min_relevance: Option<f64>,
    pub limit: usize,
}

/// A POI with its score against a query
#[derive(Debug, Clone, Serialize)]
pub struct RankedPoi {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub categories: CategorySet,
    pub distance: f64,
    pub relevance: f64,
}

/// Response for GET /api/v1/poi/:id
#[derive(Debug, Clone, Serialize)]
pub struct PoiDetails {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub categories: CategorySet,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<String>>,
    /// Stored audio asset names, e.g. `short_desc`, `fact_0`
    pub audio_assets: Vec<String>,
}

/// Response for POST /api/v1/poi/:id/audio/:kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFilesResponse {
    pub poi_id: i64,
    pub kind: AudioKind,
    pub files: Vec<PathBuf>,
}
