//! Route handlers. Each one fetches the feed once and runs one derivation.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use cmm_core::compare::{CompareBar, CompareScaled, TimeCompare};
use cmm_core::config::MaturityConfig;
use cmm_core::derive::{
    admin, analytics, calibration, dashboard, elements, mass_concrete, maturity, ota, pours,
    realtime, reports, sensors, timeline,
};
use cmm_core::derive::maturity::{CurveParams, CurveType};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub compare: Option<String>,
}

impl CompareQuery {
    /// `None` when absent; an unknown key is a bad request.
    fn selection(&self) -> Result<Option<TimeCompare>, ApiError> {
        self.compare
            .as_deref()
            .map(|key| {
                key.parse::<TimeCompare>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))
            })
            .transpose()
    }
}

fn scale_with<T: CompareScaled>(base: T, compare: Option<TimeCompare>) -> T {
    match compare {
        Some(compare) => base.scaled(compare),
        None => base,
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn realtime(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.load("Unable to reach data server").await?;
    let body = realtime::derive(&records, state.source(), Utc::now());
    Ok(Json(body).into_response())
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<dashboard::Dashboard>, ApiError> {
    let records = state.load("Unable to load dashboard").await?;
    Ok(Json(dashboard::derive(&records)))
}

pub async fn timeline(State(state): State<AppState>) -> Result<Json<timeline::Timeline>, ApiError> {
    let records = state.load("Unable to load timeline").await?;
    Ok(Json(timeline::derive(&records)))
}

pub async fn analytics(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<analytics::Analytics>, ApiError> {
    let Query(query) = query?;
    let compare = query.selection()?;
    let records = state.load("Unable to load analytics").await?;
    Ok(Json(scale_with(analytics::derive(&records), compare)))
}

pub async fn elements(State(state): State<AppState>) -> Result<Json<elements::Elements>, ApiError> {
    let records = state.load("Unable to load elements").await?;
    Ok(Json(elements::derive(&records)))
}

pub async fn mass_concrete(
    State(state): State<AppState>,
) -> Result<Json<mass_concrete::MassConcrete>, ApiError> {
    let records = state.load("Unable to load mass concrete data").await?;
    Ok(Json(mass_concrete::derive(&records)))
}

pub async fn pours(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<pours::Pours>, ApiError> {
    let Query(query) = query?;
    let compare = query.selection()?;
    let records = state.load("Unable to load pours").await?;
    Ok(Json(scale_with(pours::derive(&records), compare)))
}

pub async fn sensors(State(state): State<AppState>) -> Result<Json<sensors::Sensors>, ApiError> {
    let records = state.load("Unable to load sensors").await?;
    Ok(Json(sensors::derive(&records)))
}

pub async fn reports(State(state): State<AppState>) -> Result<Json<reports::Reports>, ApiError> {
    let records = state.load("Unable to load reports").await?;
    Ok(Json(reports::derive(&records)))
}

pub async fn calibration(
    State(state): State<AppState>,
) -> Result<Json<calibration::Calibration>, ApiError> {
    let records = state.load("Unable to load calibration").await?;
    Ok(Json(calibration::derive(&records)))
}

pub async fn ota(State(state): State<AppState>) -> Result<Json<ota::Ota>, ApiError> {
    let records = state.load("Unable to load OTA releases").await?;
    Ok(Json(ota::derive(&records)))
}

pub async fn admin(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<admin::Admin>, ApiError> {
    let Query(query) = query?;
    let compare = query.selection()?;
    let records = state.load("Unable to load admin data").await?;
    Ok(Json(scale_with(admin::derive(&records, Utc::now()), compare)))
}

/// Optional strength curve and maturity-constant overrides.
#[derive(Debug, Default, Deserialize)]
pub struct MaturityQuery {
    pub curve_type: Option<CurveType>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub f_u: Option<f64>,
    pub k: Option<f64>,
    pub sigma: Option<f64>,
    pub min_maturity: Option<f64>,
    pub t0_c: Option<f64>,
    pub ea: Option<f64>,
    pub tr_c: Option<f64>,
}

impl MaturityQuery {
    fn params(&self, defaults: &MaturityConfig) -> MaturityConfig {
        MaturityConfig {
            datum_c: self.t0_c.unwrap_or(defaults.datum_c),
            activation_energy: self.ea.unwrap_or(defaults.activation_energy),
            reference_c: self.tr_c.unwrap_or(defaults.reference_c),
        }
    }

    fn curve_params(&self) -> CurveParams {
        CurveParams {
            a: self.a,
            b: self.b,
            f_u: self.f_u,
            k: self.k,
            sigma: self.sigma,
            min_maturity: self.min_maturity,
        }
    }
}

pub async fn maturity(
    State(state): State<AppState>,
    query: Result<Query<MaturityQuery>, QueryRejection>,
) -> Result<Json<maturity::Maturity>, ApiError> {
    // validate before fetching so a bad request never touches the feed
    let Query(query) = query?;
    let model = query
        .curve_type
        .map(|curve_type| query.curve_params().model(curve_type))
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let params = query.params(state.maturity());

    let records = state.load("Unable to load maturity").await?;
    Ok(Json(maturity::derive(&records, &params, model.as_ref())))
}

pub async fn compare(
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<CompareBar>, ApiError> {
    let Query(query) = query?;
    let selected = query.selection()?.unwrap_or_default();
    Ok(Json(CompareBar::new(selected)))
}
