//! Hashed-lookup query path. Read-only: matches submitted hash values
//! against stored rows whose owning profile is verified on the requested
//! network.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{profile_hash, social_media_variation, social_profile};
use crate::models::{QueryMatchView, VariationView};
use crate::profile::{BrightIdNetwork, VerificationStatus, validate_hash_values};
use crate::state::AppState;

use super::HttpError;

pub fn router() -> Router<AppState> {
    Router::new().route("/query", post(query_profiles))
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    network: BrightIdNetwork,
    profile_hashes: Vec<String>,
}

async fn query_profiles(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<QueryMatchView>>, HttpError> {
    // The query path carries the same validation as the write paths; the
    // original service left it unbounded.
    validate_hash_values(&request.profile_hashes, state.limits.query_hash_limit)
        .map_err(|err| HttpError::new(StatusCode::BAD_REQUEST, err.to_string()))?;

    let rows = profile_hash::Entity::find()
        .find_also_related(social_profile::Entity)
        .filter(profile_hash::Column::Value.is_in(request.profile_hashes.clone()))
        .filter(social_profile::Column::Network.eq(request.network.as_str()))
        .filter(
            social_profile::Column::VerificationStatus
                .eq(VerificationStatus::Verified.as_str()),
        )
        .all(&state.database)
        .await
        .map_err(HttpError::internal)?;

    let variation_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(_, profile)| profile.as_ref().map(|p| p.variation_id))
        .collect();

    let variation_models = social_media_variation::Entity::find()
        .filter(social_media_variation::Column::Id.is_in(variation_ids))
        .all(&state.database)
        .await
        .map_err(HttpError::internal)?;
    let mut variations: HashMap<Uuid, VariationView> =
        HashMap::with_capacity(variation_models.len());
    for model in variation_models {
        let id = model.id;
        variations.insert(id, VariationView::try_from(model).map_err(HttpError::internal)?);
    }

    let mut matches = Vec::with_capacity(rows.len());
    for (hash, profile) in rows {
        let Some(profile) = profile else {
            continue;
        };
        let Some(variation) = variations.get(&profile.variation_id) else {
            continue;
        };
        matches.push(QueryMatchView {
            profile_hash: hash.value,
            variation: variation.clone(),
        });
    }

    Ok(Json(matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_request_defaults_to_node() {
        let json = r#"{"profile_hashes":["abc123"]}"#;
        let request: QueryRequest = serde_json::from_str(json).expect("request deserializes");
        assert_eq!(request.network, BrightIdNetwork::Node);
    }

    #[test]
    fn query_request_rejects_missing_hashes() {
        let json = r#"{"network":"node"}"#;
        assert!(serde_json::from_str::<QueryRequest>(json).is_err());
    }
}
