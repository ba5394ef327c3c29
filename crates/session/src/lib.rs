//! Application state for one analysis screen.
//!
//! [`session::AnalysisSession`] is the single owner of the current
//! selection, threshold, detections and render model. It drives the
//! request/response cycle through an [`backend::AnalysisBackend`] and
//! publishes every visible change as a [`events::SessionEvent`].

pub mod backend;
pub mod events;
pub mod session;
