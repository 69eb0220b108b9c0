//! HTTP handler functions for the hotspot map API.

use std::fmt::Display;

use actix_web::{HttpResponse, web};
use hotspot_map_analytics::{aggregate, filter, group_totals, parse_trend_params};
use hotspot_map_analytics_models::{ALL_GROUP, EmptyBucketPolicy, ValueColumn};
use hotspot_map_hotspot_models::Dimension;
use hotspot_map_server_models::{
    ApiError, ApiHealth, ApiMetadata, HotspotQueryParams, TotalsQueryParams, TrendQueryParams,
};
use hotspot_map_store::RecordStore;

use crate::AppState;

/// Query-string deserialization failures are reported as JSON `400`s like
/// every other client error.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(&err);
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

fn bad_request(message: &impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError::new(message.to_string()))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/metadata`
///
/// Returns the record count, distinct sources and fuels, and date range of
/// the loaded dataset.
pub async fn metadata(state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.current();
    HttpResponse::Ok().json(ApiMetadata::from(store.as_ref()))
}

/// `GET /api/hotspots`
///
/// Returns the records matching the date range and category filters, in
/// load order.
pub async fn hotspots(
    state: web::Data<AppState>,
    params: web::Query<HotspotQueryParams>,
) -> HttpResponse {
    let store = state.store.current();
    let view = filter(&store, &params.criteria());

    let records: Vec<_> = view
        .records()
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    HttpResponse::Ok().json(records)
}

/// `GET /api/trend`
///
/// Filters, then aggregates into one daily series per group. An invalid
/// group-by/metric/aggregate combination is a `400`.
pub async fn trend(
    state: web::Data<AppState>,
    params: web::Query<TrendQueryParams>,
) -> HttpResponse {
    let mut trend_params = match parse_trend_params(
        params.group_by.as_deref().unwrap_or(ALL_GROUP),
        &params.metric,
        params.aggregate.as_deref(),
    ) {
        Ok(trend_params) => trend_params,
        Err(e) => return bad_request(&e),
    };

    if let Some(policy) = params.empty_buckets.as_deref() {
        match policy.parse::<EmptyBucketPolicy>() {
            Ok(policy) => trend_params = trend_params.with_empty_buckets(policy),
            Err(_) => return bad_request(&format!("unknown empty-bucket policy '{policy}'")),
        }
    }

    let store = state.store.current();
    let view = filter(&store, &params.criteria());

    match aggregate(&view, &trend_params) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => bad_request(&e),
    }
}

/// `GET /api/totals`
///
/// Totals a metric (or the hotspot count) per source or fuel.
pub async fn totals(
    state: web::Data<AppState>,
    params: web::Query<TotalsQueryParams>,
) -> HttpResponse {
    let Ok(dimension) = params.dimension.parse::<Dimension>() else {
        return bad_request(&format!("unknown dimension '{}'", params.dimension));
    };
    let value = match params.metric.as_deref() {
        None => ValueColumn::Count,
        Some(name) => match name.parse::<ValueColumn>() {
            Ok(value) => value,
            Err(_) => return bad_request(&format!("unknown metric '{name}'")),
        },
    };

    let store = state.store.current();
    let view = filter(&store, &params.criteria());

    HttpResponse::Ok().json(group_totals(&view, dimension, value))
}

/// `POST /api/reload`
///
/// Re-reads the hotspot CSV on the blocking thread pool and publishes it. On
/// failure the previous store keeps serving and the error is returned as a
/// `500`.
pub async fn reload(state: web::Data<AppState>) -> HttpResponse {
    let path = state.path.clone();

    match web::block(move || RecordStore::load(&path)).await {
        Ok(Ok(store)) => {
            let store = state.store.publish(store);
            HttpResponse::Ok().json(ApiMetadata::from(store.as_ref()))
        }
        Ok(Err(e)) => {
            log::error!("Failed to reload {}: {e}", state.path.display());
            HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
        }
        Err(e) => {
            log::error!("Reload task for {} failed: {e}", state.path.display());
            HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
        }
    }
}
