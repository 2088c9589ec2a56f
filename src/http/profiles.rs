//! Profile lifecycle handlers: register, replace hashes, retire from query
//! results, and trigger BrightID verification. Every multi-row mutation runs
//! inside an explicit transaction so a failure leaves the old state intact.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{self, AuthError};
use crate::entities::{account, auth_token, profile_hash, social_media_variation, social_profile};
use crate::models::ProfileCreatedView;
use crate::profile::{
    BrightIdNetwork, UPDATE_HASH_CAP, VerificationStatus, validate_hash_values,
};
use crate::state::AppState;
use crate::verifier::VerifierError;

use super::HttpError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/", put(update_profile))
        .route("/", delete(delete_profile))
        .route("/verify", post(verify_profile))
}

#[derive(Debug, Deserialize)]
struct CreateProfileRequest {
    #[serde(default)]
    network: BrightIdNetwork,
    variation: Uuid,
    profile_hashes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    profile_hashes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyProfileRequest {
    profile: Uuid,
    #[serde(default)]
    network: BrightIdNetwork,
}

/// Registers a new profile: a fresh anonymous account, its bearer token, the
/// pending profile row and all hash rows, atomically.
async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileCreatedView>), HttpError> {
    validate_hash_values(
        &request.profile_hashes,
        state.limits.registration_hash_limit,
    )
    .map_err(|err| HttpError::new(StatusCode::BAD_REQUEST, err.to_string()))?;

    let variation = social_media_variation::Entity::find_by_id(request.variation)
        .one(&state.database)
        .await
        .map_err(HttpError::internal)?
        .ok_or_else(|| {
            HttpError::new(
                StatusCode::BAD_REQUEST,
                format!("Variation {} does not exist", request.variation),
            )
        })?;

    let now = Utc::now().fixed_offset();
    let account_id = Uuid::new_v4();
    let profile_id = Uuid::new_v4();
    let token_key = auth::issue_token_key();

    let txn = state
        .database
        .begin()
        .await
        .map_err(HttpError::internal)?;

    account::ActiveModel {
        id: Set(account_id),
        created_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(HttpError::internal)?;

    auth_token::ActiveModel {
        key: Set(token_key.clone()),
        account_id: Set(account_id),
        created_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(HttpError::internal)?;

    social_profile::ActiveModel {
        id: Set(profile_id),
        account_id: Set(account_id),
        network: Set(request.network.as_str().to_string()),
        verification_status: Set(VerificationStatus::Pending.as_str().to_string()),
        variation_id: Set(variation.id),
        created_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(HttpError::internal)?;

    let hash_rows = request.profile_hashes.iter().map(|value| profile_hash::ActiveModel {
        id: NotSet,
        profile_id: Set(profile_id),
        value: Set(value.clone()),
    });
    profile_hash::Entity::insert_many(hash_rows)
        .exec(&txn)
        .await
        .map_err(HttpError::internal)?;

    txn.commit().await.map_err(HttpError::internal)?;

    info!(
        "Registered profile {profile_id} ({}, network {})",
        variation.name,
        request.network.as_str()
    );

    let view = ProfileCreatedView {
        profile: profile_id,
        token: token_key,
        network: request.network,
        variation: variation.id,
        profile_hashes: request.profile_hashes,
    };
    Ok((StatusCode::CREATED, Json(view)))
}

/// Replaces the caller's entire hash set: delete-all then insert-new, never
/// a merge.
async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<StatusCode, HttpError> {
    let caller = authenticate(&state, &headers).await?;

    validate_hash_values(&request.profile_hashes, UPDATE_HASH_CAP)
        .map_err(|err| HttpError::new(StatusCode::BAD_REQUEST, err.to_string()))?;

    let txn = state
        .database
        .begin()
        .await
        .map_err(HttpError::internal)?;

    profile_hash::Entity::delete_many()
        .filter(profile_hash::Column::ProfileId.eq(caller.id))
        .exec(&txn)
        .await
        .map_err(HttpError::internal)?;

    let hash_rows = request.profile_hashes.iter().map(|value| profile_hash::ActiveModel {
        id: NotSet,
        profile_id: Set(caller.id),
        value: Set(value.clone()),
    });
    profile_hash::Entity::insert_many(hash_rows)
        .exec(&txn)
        .await
        .map_err(HttpError::internal)?;

    txn.commit().await.map_err(HttpError::internal)?;

    info!(
        "Replaced hash set for profile {} ({} entries)",
        caller.id,
        request.profile_hashes.len()
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the caller's hashes from query visibility. The profile, account
/// and token rows survive so the credential can re-register hashes later.
async fn delete_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let caller = authenticate(&state, &headers).await?;

    let result = profile_hash::Entity::delete_many()
        .filter(profile_hash::Column::ProfileId.eq(caller.id))
        .exec(&state.database)
        .await
        .map_err(HttpError::internal)?;

    info!(
        "Cleared {} hash rows for profile {}",
        result.rows_affected, caller.id
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Asks BrightID whether the profile is linked and persists the one-way
/// `pending -> verified` transition. Already-verified profiles short-circuit
/// with no outbound call.
async fn verify_profile(
    State(state): State<AppState>,
    Json(request): Json<VerifyProfileRequest>,
) -> Result<StatusCode, HttpError> {
    let profile = social_profile::Entity::find_by_id(request.profile)
        .filter(social_profile::Column::Network.eq(request.network.as_str()))
        .one(&state.database)
        .await
        .map_err(HttpError::internal)?
        .ok_or_else(|| {
            HttpError::new(
                StatusCode::NOT_FOUND,
                format!("Profile {} not found", request.profile),
            )
        })?;

    let status = VerificationStatus::parse(&profile.verification_status)
        .map_err(HttpError::internal)?;
    if status.is_verified() {
        return Ok(StatusCode::NO_CONTENT);
    }

    let variation = social_media_variation::Entity::find_by_id(profile.variation_id)
        .one(&state.database)
        .await
        .map_err(HttpError::internal)?
        .ok_or_else(|| HttpError::internal("Profile references a missing variation"))?;

    state
        .verifier
        .verify_app_link(
            request.network,
            variation.bright_id_app_id.as_deref(),
            profile.id,
        )
        .await
        .map_err(|err| match err {
            VerifierError::Unavailable => {
                HttpError::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            VerifierError::Rejected(payload) => {
                HttpError::passthrough(StatusCode::BAD_REQUEST, payload)
            }
            VerifierError::Unreachable(reason) => {
                HttpError::new(StatusCode::BAD_GATEWAY, reason)
            }
        })?;

    let profile_id = profile.id;
    let txn = state
        .database
        .begin()
        .await
        .map_err(HttpError::internal)?;
    let mut active: social_profile::ActiveModel = profile.into();
    active.verification_status = Set(VerificationStatus::Verified.as_str().to_string());
    active.update(&txn).await.map_err(HttpError::internal)?;
    txn.commit().await.map_err(HttpError::internal)?;

    info!("Profile {profile_id} verified on {}", request.network.as_str());
    Ok(StatusCode::NO_CONTENT)
}

async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<social_profile::Model, HttpError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let key = auth::parse_token_header(header)
        .map_err(|err| HttpError::new(StatusCode::UNAUTHORIZED, err.to_string()))?;

    auth::resolve_caller(&state.database, key)
        .await
        .map_err(|err| match err {
            AuthError::Unauthorized => HttpError::new(StatusCode::UNAUTHORIZED, err.to_string()),
            AuthError::Database(db_err) => HttpError::internal(db_err),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_to_node_network() {
        let json = r#"{"variation":"30df9830-2b8d-4313-bd8a-bc2e90d0f02b","profile_hashes":["abc"]}"#;
        let request: CreateProfileRequest =
            serde_json::from_str(json).expect("request deserializes");
        assert_eq!(request.network, BrightIdNetwork::Node);
        assert_eq!(request.profile_hashes, vec!["abc".to_string()]);
    }

    #[test]
    fn create_request_accepts_explicit_network() {
        let json = r#"{"network":"app","variation":"30df9830-2b8d-4313-bd8a-bc2e90d0f02b","profile_hashes":["abc"]}"#;
        let request: CreateProfileRequest =
            serde_json::from_str(json).expect("request deserializes");
        assert_eq!(request.network, BrightIdNetwork::App);
    }

    #[test]
    fn verify_request_requires_profile_id() {
        let json = r#"{"network":"node"}"#;
        assert!(serde_json::from_str::<VerifyProfileRequest>(json).is_err());

        let json = r#"{"profile":"a3bb189e-8bf9-3888-9912-ace4e6543002"}"#;
        let request: VerifyProfileRequest =
            serde_json::from_str(json).expect("request deserializes");
        assert_eq!(request.network, BrightIdNetwork::Node);
    }
}
