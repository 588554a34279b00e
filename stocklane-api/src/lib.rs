//! # Stocklane API Server Library
//!
//! This library provides the HTTP surface of Stocklane: a multi-tenant
//! inventory backend where organizations register, users authenticate,
//! and authenticated users manage a per-organization product catalog.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors aligned with the error taxonomy
//! - `middleware`: Response-level middleware (security headers)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
