//! HTTP request handlers for the daycare billing API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{generate_invoice_for, generate_invoices};
use crate::error::BillingError;
use crate::models::BillingMonth;

use super::request::InvoiceRequest;
use super::response::{ApiError, ApiErrorResponse, InvoiceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/invoice", post(invoice_handler))
        .route("/invoices/:year/:month", get(month_invoices_handler))
        .route(
            "/parents/:parent_id/invoices/:year/:month",
            get(parent_invoice_handler),
        )
        .route(
            "/children/:child_id/accounting/:year/:month",
            get(child_accounting_handler),
        )
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: BillingError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into an [`ApiError`].
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Turns a path extraction failure into an [`ApiError`].
fn path_rejection_error(rejection: PathRejection, correlation_id: Uuid) -> ApiError {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Path parameter error"
    );
    ApiError::new("INVALID_PATH", body_text)
}

/// Handler for POST /invoice.
///
/// Bills the family carried in the request body; the server's enrolled
/// families and ledger are not touched.
async fn invoice_handler(payload: Result<Json<InvoiceRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let result = request.billing_month().and_then(|period| {
        let holidays = request.holiday_set()?;
        let (parent_id, registry) = request.into_registry()?;
        let parent = registry.parent(&parent_id)?;
        generate_invoice_for(&period, parent, &registry, &holidays)
    });

    match result {
        Ok(invoice) => {
            info!(
                correlation_id = %correlation_id,
                invoice_id = %invoice.invoice_id,
                total_fee = %invoice.totals.fee,
                "Invoice request completed"
            );
            json_response(StatusCode::OK, InvoiceResponse::from(invoice))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invoice request failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /parents/:parent_id/invoices/:year/:month.
///
/// Bills an enrolled parent against the configured holiday calendar and
/// records each child's accounting into the shared ledger.
async fn parent_invoice_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i64, i64)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path((parent_id, year, month)) = match path {
        Ok(path) => path,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                path_rejection_error(rejection, correlation_id),
            );
        }
    };
    info!(
        correlation_id = %correlation_id,
        parent_id = %parent_id,
        year,
        month,
        "Processing parent invoice request"
    );

    let config = state.config();
    let result = BillingMonth::from_parts(year, month).and_then(|period| {
        let parent = config.get_parent(&parent_id)?;
        generate_invoice_for(&period, parent, config.registry(), config.holidays())
    });

    match result {
        Ok(invoice) => {
            let recorded = state.ledger().write().record_invoice(&invoice);
            info!(
                correlation_id = %correlation_id,
                invoice_id = %invoice.invoice_id,
                recorded,
                "Invoice recorded in ledger"
            );
            json_response(StatusCode::OK, InvoiceResponse::from(invoice))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                parent_id = %parent_id,
                error = %err,
                "Parent invoice request failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /invoices/:year/:month.
///
/// Bills every enrolled parent for the month and records the results into
/// the ledger. Nothing is recorded if any parent fails.
async fn month_invoices_handler(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path((year, month)) = match path {
        Ok(path) => path,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                path_rejection_error(rejection, correlation_id),
            );
        }
    };
    info!(
        correlation_id = %correlation_id,
        year,
        month,
        "Processing month invoices request"
    );

    let config = state.config();
    let result = BillingMonth::from_parts(year, month)
        .and_then(|period| generate_invoices(&period, config.registry(), config.holidays()));

    match result {
        Ok(invoices) => {
            let recorded: usize = {
                let mut ledger = state.ledger().write();
                invoices
                    .iter()
                    .map(|invoice| ledger.record_invoice(invoice))
                    .sum()
            };
            info!(
                correlation_id = %correlation_id,
                invoices = invoices.len(),
                recorded,
                "Month invoices recorded in ledger"
            );
            let body: Vec<InvoiceResponse> =
                invoices.into_iter().map(InvoiceResponse::from).collect();
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Month invoices request failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /children/:child_id/accounting/:year/:month.
async fn child_accounting_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i64, i64)>, PathRejection>,
) -> Response {
    let Path((child_id, year, month)) = match path {
        Ok(path) => path,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                path_rejection_error(rejection, Uuid::new_v4()),
            );
        }
    };
    let period = match BillingMonth::from_parts(year, month) {
        Ok(period) => period,
        Err(err) => return error_response(err),
    };
    if let Err(err) = state.config().get_child(&child_id) {
        return error_response(err);
    }

    let ledger = state.ledger().read();
    match ledger.get(&child_id, period) {
        Some(entry) => json_response(StatusCode::OK, entry),
        None => json_response(
            StatusCode::NOT_FOUND,
            ApiError::with_details(
                "ACCOUNTING_NOT_FOUND",
                format!("No accounting for child '{}' in {}", child_id, period),
                "Generate the parent's invoice for this month first",
            ),
        ),
    }
}
