//! HTTP client for the image analysis service.
//!
//! Wraps `POST /analyze` (multipart image + threshold) and `GET /health`
//! using [`reqwest`]. Responses are validated against the schema in
//! `sightline_core::response` before they are handed back.

pub mod api;
