//! # Relay Core
//!
//! Core business logic for Onchain Relay, the headless backend of the
//! research dashboard:
//!
//! ```text
//! relay-core/src/
//! ├── forward/   # Retrying proxy forwarder (bounded backoff loop)
//! └── search/    # Provider search client + TLDR summarizer
//! ```
//!
//! The HTTP surface (axum router, handlers, CLI) lives in `relay-server`.

pub mod forward;
pub mod search;
