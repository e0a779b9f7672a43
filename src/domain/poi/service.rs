use super::error::{FailedAsset, PoiServiceError};
use super::{
    AssetKind, AudioFilesResponse, AudioKind, Poi, PoiDetails, PoiRepository, RankedPoi,
    RelevanceQuery,
};
use crate::domain::category::CategorySet;
use crate::domain::narrative::{split_into_facts, NarrativeRequest, NarrativeServiceApi};
use crate::domain::speech::{SpeechServiceApi, TtsGenerateRequest};
use crate::infrastructure::repositories::AudioAssetStore;
use async_trait::async_trait;
use moka::future::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const MAX_GENERATION_LOCKS: u64 = 10_000;
const GENERATION_LOCK_IDLE: Duration = Duration::from_secs(600);

pub struct PoiService {
    poi_repo: Arc<dyn PoiRepository>,
    narrative_service: Arc<dyn NarrativeServiceApi>,
    speech_service: Arc<dyn SpeechServiceApi>,
    assets: AudioAssetStore,
    /// One async mutex per generation key, so a missing asset is produced once
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl PoiService {
    pub fn new(
        poi_repo: Arc<dyn PoiRepository>,
        narrative_service: Arc<dyn NarrativeServiceApi>,
        speech_service: Arc<dyn SpeechServiceApi>,
        assets: AudioAssetStore,
    ) -> Self {
        let locks = Cache::builder()
            .max_capacity(MAX_GENERATION_LOCKS)
            .time_to_idle(GENERATION_LOCK_IDLE)
            .build();
        Self {
            poi_repo,
            narrative_service,
            speech_service,
            assets,
            locks,
        }
    }

    async fn lock_for(&self, key: String) -> Arc<Mutex<()>> {
        self.locks
            .get_with(key, async { Arc::new(Mutex::new(())) })
            .await
    }

    async fn find_poi(&self, poi_id: i64) -> Result<Poi, PoiServiceError> {
        self.poi_repo
            .find_by_id(poi_id)
            .await
            .ok_or_else(|| PoiServiceError::NotFound(format!("POI {} not found", poi_id)))
    }

    /// Return the asset path, synthesizing `text` into it if the file is absent
    async fn ensure_asset(
        &self,
        poi_id: i64,
        asset: AssetKind,
        text: &str,
    ) -> Result<PathBuf, PoiServiceError> {
        let lock = self.lock_for(format!("poi:{}:{}", poi_id, asset)).await;
        let _guard = lock.lock().await;

        if self.assets.exists(poi_id, asset).await? {
            tracing::debug!(poi_id = poi_id, asset = %asset, "Audio asset already present");
            return Ok(self.assets.path_for(poi_id, asset));
        }

        tracing::info!(poi_id = poi_id, asset = %asset, "Synthesizing missing audio asset");

        let speech = self
            .speech_service
            .synthesize(TtsGenerateRequest {
                text: text.to_string(),
                speaker: None,
                sample_rate: None,
                speed: None,
            })
            .await
            .map_err(|e| {
                tracing::error!(poi_id = poi_id, asset = %asset, error = %e, "Audio synthesis failed");
                PoiServiceError::from(e)
            })?;

        let path = self
            .assets
            .write(poi_id, asset, &speech.audio_data)
            .await?;

        Ok(path)
    }

    /// Fact items of the POI, generating and caching the narrative when absent.
    /// Text generation finishes before any fact audio is synthesized.
    async fn ensure_facts(&self, poi: Poi) -> Result<Vec<String>, PoiServiceError> {
        if poi.has_facts() {
            return Ok(poi.facts.unwrap_or_default());
        }

        let lock = self.lock_for(format!("poi:{}:facts_text", poi.id)).await;
        let _guard = lock.lock().await;

        // Another request may have generated the facts while we waited
        let poi = self.find_poi(poi.id).await?;
        if poi.has_facts() {
            return Ok(poi.facts.unwrap_or_default());
        }

        tracing::info!(poi_id = poi.id, "Generating facts narrative");

        let request = NarrativeRequest {
            name: poi.name,
            description: poi.short_description,
            facts: poi.source_facts,
        };
        let narrative = self.narrative_service.generate(&request).await.map_err(|e| {
            tracing::error!(poi_id = poi.id, error = %e, "Facts narrative generation failed");
            PoiServiceError::from(e)
        })?;

        let facts = split_into_facts(&narrative);
        if facts.is_empty() {
            return Err(PoiServiceError::TextGenerationFailed(
                "narrative contains no facts".to_string(),
            ));
        }

        self.poi_repo
            .save_facts(poi.id, narrative, facts.clone())
            .await
            .map_err(PoiServiceError::NotFound)?;

        tracing::info!(poi_id = poi.id, fact_count = facts.len(), "Facts narrative cached");

        Ok(facts)
    }

    async fn ensure_fact_assets(
        &self,
        poi_id: i64,
        facts: &[String],
    ) -> Result<Vec<PathBuf>, PoiServiceError> {
        let mut ready = Vec::with_capacity(facts.len());
        let mut failures = Vec::new();

        for (index, fact) in facts.iter().enumerate() {
            let asset = AssetKind::Fact(index);
            match self.ensure_asset(poi_id, asset, fact).await {
                Ok(path) => ready.push(path),
                Err(e) => failures.push((asset, e)),
            }
        }

        if failures.is_empty() {
            return Ok(ready);
        }

        if ready.is_empty() {
            let (_, first) = failures.remove(0);
            return Err(first);
        }

        tracing::warn!(
            poi_id = poi_id,
            ready = ready.len(),
            failed = failures.len(),
            "Fact audio partially generated"
        );

        Err(PoiServiceError::PartialFailure {
            ready,
            failed: failures
                .iter()
                .map(|(asset, err)| FailedAsset::new(*asset, err))
                .collect(),
        })
    }
}

#[async_trait]
pub trait PoiServiceApi: Send + Sync {
    async fn get_poi(&self, poi_id: i64) -> Result<PoiDetails, PoiServiceError>;

    /// POIs ranked by relevance to the interests, closest first among equals
    async fn find_relevant(&self, query: RelevanceQuery) -> Result<Vec<RankedPoi>, PoiServiceError>;

    async fn distance(&self, poi_id: i64, x: f64, y: f64) -> Result<f64, PoiServiceError>;

    async fn relevance(
        &self,
        poi_id: i64,
        interests: &CategorySet,
    ) -> Result<f64, PoiServiceError>;

    /// Paths of the audio for `kind`, generating whatever is missing.
    ///
    /// `kind` is validated before any lookup or I/O.
    async fn get_audio(&self, poi_id: i64, kind: &str)
        -> Result<AudioFilesResponse, PoiServiceError>;

    /// Bytes of one stored asset, never generated on read
    async fn read_audio(&self, poi_id: i64, asset: AssetKind)
        -> Result<Vec<u8>, PoiServiceError>;
}

#[async_trait]
impl PoiServiceApi for PoiService {
    async fn get_poi(&self, poi_id: i64) -> Result<PoiDetails, PoiServiceError> {
        let poi = self.find_poi(poi_id).await?;
        let audio_assets = self
            .assets
            .existing_assets(poi_id)
            .await?
            .into_iter()
            .map(|asset| asset.file_stem())
            .collect();

        Ok(PoiDetails {
            id: poi.id,
            name: poi.name,
            x: poi.position.x,
            y: poi.position.y,
            categories: poi.categories,
            description: poi.short_description,
            narrative: poi.narrative,
            facts: poi.facts,
            audio_assets,
        })
    }

    async fn find_relevant(&self, query: RelevanceQuery) -> Result<Vec<RankedPoi>, PoiServiceError> {
        if !query.x.is_finite() || !query.y.is_finite() {
            return Err(PoiServiceError::InvalidArgument(
                "x and y must be finite numbers".to_string(),
            ));
        }
        if let Some(radius) = query.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(PoiServiceError::InvalidArgument(format!(
                    "radius must be a non-negative number, got {}",
                    radius
                )));
            }
        }
        if let Some(min) = query.min_relevance {
            if !(0.0..=1.0).contains(&min) {
                return Err(PoiServiceError::InvalidArgument(format!(
                    "min_relevance must be between 0 and 1, got {}",
                    min
                )));
            }
        }
        if query.limit == 0 {
            return Err(PoiServiceError::InvalidArgument(
                "limit must be greater than 0".to_string(),
            ));
        }

        let mut ranked: Vec<RankedPoi> = self
            .poi_repo
            .find_all()
            .await
            .into_iter()
            .map(|poi| {
                let distance = poi.distance_to(query.x, query.y);
                let relevance = poi.relevance_to(&query.interests);
                RankedPoi {
                    id: poi.id,
                    name: poi.name,
                    x: poi.position.x,
                    y: poi.position.y,
                    categories: poi.categories,
                    distance,
                    relevance,
                }
            })
            .filter(|poi| query.radius.map_or(true, |radius| poi.distance <= radius))
            .filter(|poi| query.min_relevance.map_or(true, |min| poi.relevance >= min))
            .collect();

        ranked.sort_by(|a, b| {
            b.relevance
                .total_cmp(&a.relevance)
                .then(a.distance.total_cmp(&b.distance))
                .then(a.id.cmp(&b.id))
        });
        ranked.truncate(query.limit);

        tracing::debug!(
            x = query.x,
            y = query.y,
            interests = query.interests.len(),
            results = ranked.len(),
            "Relevant POIs ranked"
        );

        Ok(ranked)
    }

    async fn distance(&self, poi_id: i64, x: f64, y: f64) -> Result<f64, PoiServiceError> {
        let poi = self.find_poi(poi_id).await?;
        Ok(poi.distance_to(x, y))
    }

    async fn relevance(
        &self,
        poi_id: i64,
        interests: &CategorySet,
    ) -> Result<f64, PoiServiceError> {
        let poi = self.find_poi(poi_id).await?;
        let score = poi.relevance_to(interests);
        tracing::info!(poi_id = poi_id, relevance = score, "Relevance computed");
        Ok(score)
    }

    async fn get_audio(
        &self,
        poi_id: i64,
        kind: &str,
    ) -> Result<AudioFilesResponse, PoiServiceError> {
        let kind: AudioKind = kind.parse().map_err(PoiServiceError::InvalidArgument)?;
        let poi = self.find_poi(poi_id).await?;

        tracing::info!(poi_id = poi_id, kind = %kind, "Audio requested");

        let files = match kind {
            AudioKind::ShortDesc => {
                vec![
                    self.ensure_asset(poi_id, AssetKind::ShortDesc, &poi.short_description)
                        .await?,
                ]
            }
            AudioKind::FactsDesc => {
                let facts = self.ensure_facts(poi).await?;
                self.ensure_fact_assets(poi_id, &facts).await?
            }
        };

        Ok(AudioFilesResponse {
            poi_id,
            kind,
            files,
        })
    }

    async fn read_audio(
        &self,
        poi_id: i64,
        asset: AssetKind,
    ) -> Result<Vec<u8>, PoiServiceError> {
        self.find_poi(poi_id).await?;
        Ok(self.assets.read(poi_id, asset).await?)
    }
}
