//! Client-side session controller for an AI website generation service.
//!
//! The service generates website markup from a prompt (or at random); this
//! crate owns everything stateful on the client side of that exchange:
//!
//! - [`client`] — request/response wrapper for the service's two operations
//! - [`history`] — unique entry identity mirrored into a navigable history
//! - [`session`] — the state machine: triggers, loading/error/quota tracking,
//!   and reconciliation of out-of-order async results via provenance tags
//! - [`preview`] — the seam to the isolated surface that renders markup
//!
//! Rendering, form fields, and the download helper are collaborators behind
//! narrow traits; the remote service is consumed through
//! [`client::GenerateService`].

pub mod client;
pub mod config;
pub mod history;
pub mod logging;
pub mod mvi;
pub mod preview;
pub mod session;
