use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{EntityTrait, QueryOrder};

use crate::entities::social_media_variation;
use crate::models::VariationView;
use crate::state::AppState;

use super::HttpError;

const CATALOG_CACHE_KEY: &str = "catalog";

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_variations))
}

async fn list_variations(
    State(state): State<AppState>,
) -> Result<Json<Vec<VariationView>>, HttpError> {
    if let Some(cached) = state.cache.variations.get(CATALOG_CACHE_KEY).await {
        return Ok(Json((*cached).clone()));
    }

    let models = social_media_variation::Entity::find()
        .order_by_asc(social_media_variation::Column::Name)
        .all(&state.database)
        .await
        .map_err(HttpError::internal)?;

    let mut views = Vec::with_capacity(models.len());
    for model in models {
        views.push(VariationView::try_from(model).map_err(HttpError::internal)?);
    }

    state
        .cache
        .variations
        .insert(CATALOG_CACHE_KEY.to_string(), Arc::new(views.clone()))
        .await;

    Ok(Json(views))
}
