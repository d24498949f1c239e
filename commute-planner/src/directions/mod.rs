//! Directions provider client.
//!
//! This module provides an HTTP client for a Google-Directions-shaped API
//! and the transit query layer built on top of it.
//!
//! Key characteristics of the provider:
//! - Times are epoch seconds; walking legs carry no departure/arrival time
//! - A payload `status` other than "OK" signals failure even on HTTP 200
//! - Step instructions carry a small amount of HTML markup

mod client;
mod convert;
mod error;
pub mod mock;
mod query;
mod types;

pub use client::{
    DepartAt, DirectionsApi, DirectionsClient, DirectionsConfig, DirectionsRequest, RequestMode,
};
pub use convert::{ConversionError, convert_route, convert_routes, line_info, sanitize_instructions};
pub use error::DirectionsError;
pub use query::{RouteQueryClient, RouteQueryError, RouteSource};
pub use types::{
    DirectionsResponse, Leg, LegStep, Route, TextValue, TimeValue, TransitDetails, TransitLine,
    Vehicle,
};
