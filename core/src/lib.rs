//! API client core for the drilling-campaign console.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values, with a
//! pluggable `Transport` doing the network round-trip in between. On top of
//! that sit the typed endpoints for every resource, the page controllers that
//! fan out list requests and denormalize foreign keys, and the grid and
//! timeline presentation models.
//!
//! # Design
//! - `ApiClient` is stateless apart from its configuration and transport.
//! - Every non-2xx response becomes a single `HttpError` type.
//! - Pages isolate collection failures: a failed list request becomes an
//!   empty page plus a recorded `FetchFailure`.
//! - Derived values (duration, cost) are computed at render time and are
//!   absent, not zero, when an input is missing.

pub mod client;
pub mod config;
pub mod derived;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod grid;
pub mod http;
pub mod lookup;
pub mod page;
pub mod pages;
pub mod problem;
pub mod resource;
pub mod timeline;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, Payload, RequestOptions};
pub use config::ClientConfig;
pub use endpoints::ListQuery;
pub use error::{ApiError, HttpError};
pub use grid::{Grid, SortDirection};
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
pub use lookup::LookupMap;
pub use page::{FetchFailure, Loaded, Page, PageController, PageState};
pub use problem::{ApiProblem, FieldMessages, ProblemCode};
pub use resource::{Named, Resource, ResourceKind};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::*;
