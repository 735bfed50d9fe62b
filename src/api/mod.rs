//! HTTP API module for the daycare billing engine.
//!
//! This module provides the REST API endpoints for generating monthly
//! invoices and looking up recorded per-child accounting.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ChildRequest, InvoiceRequest, ParentRequest};
pub use response::{ApiError, ApiErrorResponse, InvoiceResponse, InvoiceRow};
pub use state::AppState;
