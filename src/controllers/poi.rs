use axum::{
    body::Body,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        category::CategorySet,
        poi::{AssetKind, AudioFilesResponse, PoiDetails, PoiServiceApi, RankedPoi, RelevanceQuery},
    },
    error::{AppError, AppResult},
};

const DEFAULT_NEARBY_LIMIT: usize = 20;

/// Query for GET /api/v1/poi/nearby
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub x: f64,
    pub y: f64,
    /// Comma-separated category ids
    pub interests: Option<String>,
    pub radius: Option<f64>,
    pub min_relevance: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PositionParams {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct InterestsParams {
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub poi_id: i64,
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelevanceResponse {
    pub poi_id: i64,
    pub relevance: f64,
}

pub struct PoiController {
    poi_service: Arc<dyn PoiServiceApi>,
}

impl PoiController {
    pub fn new(poi_service: Arc<dyn PoiServiceApi>) -> Self {
        Self { poi_service }
    }

    /// GET /api/v1/poi/nearby - POIs ranked against the caller's interests
    pub async fn nearby(
        State(controller): State<Arc<PoiController>>,
        params: Result<Query<NearbyParams>, QueryRejection>,
    ) -> AppResult<Json<Vec<RankedPoi>>> {
        let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let query = RelevanceQuery {
            x: params.x,
            y: params.y,
            interests: parse_interests(params.interests.as_deref().unwrap_or_default())?,
            radius: params.radius,
            min_relevance: params.min_relevance,
            limit: params.limit.unwrap_or(DEFAULT_NEARBY_LIMIT),
        };

        let ranked = controller.poi_service.find_relevant(query).await?;
        Ok(Json(ranked))
    }

    /// GET /api/v1/poi/{id} - POI details with cached text and stored audio
    pub async fn get_poi(
        State(controller): State<Arc<PoiController>>,
        poi_id: Result<Path<i64>, PathRejection>,
    ) -> AppResult<Json<PoiDetails>> {
        let Path(poi_id) = poi_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let details = controller.poi_service.get_poi(poi_id).await?;
        Ok(Json(details))
    }

    /// GET /api/v1/poi/{id}/distance - Distance from a position to the POI
    pub async fn distance(
        State(controller): State<Arc<PoiController>>,
        poi_id: Result<Path<i64>, PathRejection>,
        params: Result<Query<PositionParams>, QueryRejection>,
    ) -> AppResult<Json<DistanceResponse>> {
        let Path(poi_id) = poi_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let distance = controller
            .poi_service
            .distance(poi_id, params.x, params.y)
            .await?;

        Ok(Json(DistanceResponse { poi_id, distance }))
    }

    /// GET /api/v1/poi/{id}/relevance - Relevance of the POI to a set of interests
    pub async fn relevance(
        State(controller): State<Arc<PoiController>>,
        poi_id: Result<Path<i64>, PathRejection>,
        params: Result<Query<InterestsParams>, QueryRejection>,
    ) -> AppResult<Json<RelevanceResponse>> {
        let Path(poi_id) = poi_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let interests = parse_interests(&params.interests)?;

        let relevance = controller.poi_service.relevance(poi_id, &interests).await?;

        Ok(Json(RelevanceResponse { poi_id, relevance }))
    }

    /// POST /api/v1/poi/{id}/audio/{kind} - Ensure audio exists, generating what is missing
    pub async fn generate_audio(
        State(controller): State<Arc<PoiController>>,
        path: Result<Path<(i64, String)>, PathRejection>,
    ) -> AppResult<Json<AudioFilesResponse>> {
        let Path((poi_id, kind)) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let response = controller.poi_service.get_audio(poi_id, &kind).await?;
        Ok(Json(response))
    }

    /// GET /api/v1/poi/{id}/audio/files/{asset} - Download one stored asset
    pub async fn download_audio(
        State(controller): State<Arc<PoiController>>,
        path: Result<Path<(i64, String)>, PathRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Path((poi_id, asset)) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let asset = parse_asset(&asset)?;
        let audio = controller.poi_service.read_audio(poi_id, asset).await?;

        let disposition =
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", asset.file_name()))
                .map_err(|e| AppError::Internal(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(header::CONTENT_DISPOSITION, disposition);

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}

fn parse_interests(raw: &str) -> AppResult<CategorySet> {
    CategorySet::parse_list(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_asset(raw: &str) -> AppResult<AssetKind> {
    raw.parse::<AssetKind>().map_err(AppError::BadRequest)
}
