#![doc = "contentful-ingest: build-time content ingestion pipeline."]

//! This crate fetches all entries of configured content types from a
//! headless content API, paging to exhaustion, applies a per-type transform
//! policy, binds the results into a host build tool's shared data store and
//! optionally renders each entry through a template into build artifacts.
//!
//! The host build tool, its template engine and its file writer are
//! external collaborators reached through the traits in [`contract`].

pub mod client;
pub mod config;
pub mod contract;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod plugin;
pub mod store;
pub mod transform;
