//! SOS Dispatch - fans a single emergency alert out to a list of contacts over
//! SMS, voice and chat providers and reports one consolidated outcome.
//!
//! # Architecture
//!
//! - **domain**: Value objects for contacts, locations and channel kinds
//! - **models**: Alert requests, per-send outcomes and the composite result
//! - **validation**: Structural checks on raw request bodies
//! - **client**: Blocking HTTP client shared by provider adapters
//! - **adapters**: The `ChannelAdapter` contract and the SMS, voice and chat providers
//! - **registry**: Enabled adapters, built once from verified configuration
//! - **dispatch**: Concurrent fan-out with a cycle deadline, plus result aggregation
//! - **server**: axum façade exposing `POST /send-sos`
//! - **config**, **error**, **metrics**: ambient support

pub mod adapters;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod server;
pub mod validation;

pub use adapters::ChannelAdapter;
pub use config::Config;
pub use dispatch::{aggregate, DispatchSettings, Dispatcher};
pub use domain::{ChannelKind, Contact, Location, ValidationError};
pub use error::{AdapterError, AggregateFailure, ConfigError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{AlertRequest, DispatchOutcome, DispatchResult, FailureReason, OutcomeStatus};
pub use registry::AdapterRegistry;
pub use server::{create_router, AppState};
pub use validation::{validate, RequestValidator};
