use crate::error::ServerResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use shoestore::{ListQuery, Shoe};
use std::sync::Arc;
use store::Document;

/// Query parameters for listing shoes
#[derive(Debug, Default, Deserialize)]
pub struct ListShoesQuery {
    /// Free-text term matched against name, description, brand and category
    #[serde(default)]
    pub q: Option<String>,

    /// Brand term
    #[serde(default)]
    pub brand: Option<String>,

    /// Maximum number of results; 0 means unlimited
    #[serde(default)]
    pub limit: Option<u32>,
}

impl From<ListShoesQuery> for ListQuery {
    fn from(query: ListShoesQuery) -> Self {
        ListQuery {
            q: query.q,
            brand: query.brand,
            limit: query.limit,
        }
    }
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct ListShoesResponse {
    pub items: Vec<Document>,
}

/// Creation response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShoeResponse {
    pub id: String,
}

/// List or search shoes (GET /api/shoes)
pub async fn list_shoes(
    State(state): State<Arc<ServerState>>,
    ApiQuery(query): ApiQuery<ListShoesQuery>,
) -> impl IntoResponse {
    let items = state.catalog.list(&query.into()).await;
    tracing::debug!(count = items.len(), "listed shoes");
    Json(ListShoesResponse { items })
}

/// Create a shoe (POST /api/shoes)
pub async fn create_shoe(
    State(state): State<Arc<ServerState>>,
    ApiJson(shoe): ApiJson<Shoe>,
) -> ServerResult<impl IntoResponse> {
    let id = state.catalog.create(&shoe).await?;
    Ok(Json(CreateShoeResponse { id }))
}
