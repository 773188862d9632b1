//! HTTP routes of the routing service

use std::sync::Arc;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tower::{BoxError, ServiceBuilder, limit::GlobalConcurrencyLimitLayer, timeout::TimeoutLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use zelenasled_core::{
    Error, ErrorKind, RouteRequest, RoutingCriterion, RoutingModel, TransportMode,
    find_green_routes,
};

use crate::config::ServerSettings;

pub struct AppState {
    pub model: RoutingModel,
}

/// Body of `POST /api/get_paths/`; coordinates are `[lat, lon]`
#[derive(Debug, Deserialize)]
pub struct PathsRequest {
    origin_coords: Option<[f64; 2]>,
    destination_coords: Option<[f64; 2]>,
    commute_mode: Option<String>,
    routing_mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct GraphSize {
    nodes: usize,
    edges: usize,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    walk: GraphSize,
    bike: GraphSize,
}

/// Error returned by the handlers, rendered as `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        match error.kind() {
            ErrorKind::Input
            | ErrorKind::Unreachable
            | ErrorKind::Coverage
            | ErrorKind::InsufficientCandidates => Self::bad_request(error.to_string()),
            ErrorKind::Precondition | ErrorKind::Internal => {
                tracing::error!("Routing failed: {error}");
                Self::internal(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Build the Axum router
pub fn build_router(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/api/get_paths/", post(get_paths))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(settings.request_timeout()))
                .layer(GlobalConcurrencyLimitLayer::new(
                    settings.max_concurrent_requests,
                )),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_middleware_error(error: BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        ApiError {
            status: StatusCode::REQUEST_TIMEOUT,
            message: "Request took too long".to_string(),
        }
    } else {
        ApiError::internal(format!("Unhandled internal error: {error}"))
    }
}

async fn get_paths(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PathsRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = parse_request(payload)?;

    let selection = tokio::task::spawn_blocking(move || {
        find_green_routes(&state.model, &request)?.to_geojson()
    })
    .await
    .map_err(|e| ApiError::internal(format!("Routing task failed: {e}")))??;

    Ok(Json(selection))
}

fn parse_request(payload: PathsRequest) -> Result<RouteRequest, ApiError> {
    let (Some(origin), Some(destination)) = (payload.origin_coords, payload.destination_coords)
    else {
        return Err(ApiError::bad_request(
            "Origin and destination coordinates are required",
        ));
    };
    let Some(mode) = payload.commute_mode else {
        return Err(ApiError::bad_request(
            "Commute mode is required (walk or bike)",
        ));
    };

    let mode = mode.parse::<TransportMode>()?;
    let criterion = RoutingCriterion::from_mode(payload.routing_mode.as_deref())?;
    tracing::debug!(?origin, ?destination, %mode, %criterion, "Routing request");

    Ok(RouteRequest::from_lat_lon(origin, destination, mode, criterion))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let size = |mode: TransportMode| {
        let graph = &state.model.graphs(mode).by_length;
        GraphSize {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    };

    Json(HealthResponse {
        status: "ok",
        walk: size(TransportMode::Walk),
        bike: size(TransportMode::Bike),
    })
}
