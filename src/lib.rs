//! Copper CRM Actions Library
//!
//! Request builders and a small HTTP host for two Copper CRM actions:
//! creating a person and partially updating a lead.
//!
//! # Modules
//!
//! - `auth`: Copper credentials and header injection.
//! - `config`: Configuration management.
//! - `copper_client`: Copper API client shared by both actions.
//! - `create_person`: "Create Person" body building and execution.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `http`: Outbound HTTP invoker.
//! - `models`: Action inputs and request bodies.
//! - `props`: Form definitions of the actions.
//! - `update_lead`: "Update Lead" body building and execution.

pub mod auth;
pub mod config;
pub mod copper_client;
pub mod create_person;
pub mod errors;
pub mod handlers;
pub mod http;
pub mod models;
pub mod props;
pub mod update_lead;
