//! Domain logic for the sightline analysis client.
//!
//! Everything in this crate is pure: request construction, response
//! schema validation and the render model are deterministic functions of
//! their inputs. Network access lives in `sightline-client`, application
//! state in `sightline-session`.

pub mod detection;
pub mod error;
pub mod locale;
pub mod notice;
pub mod render;
pub mod request;
pub mod response;
pub mod selection;
pub mod threshold;
pub mod tier;
