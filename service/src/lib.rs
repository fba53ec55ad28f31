//! Domain logic for the social-networking backend: the nested-relation
//! write pipeline, the follow/like graph mutators and notifications.
//!
//! Every function takes the connection explicitly, so the same code runs
//! against a live database, a transaction, or the in-memory test database.
//! Caller identity is likewise an explicit parameter on every mutation;
//! nothing here reads ambient request state.

mod error;
mod pipeline;

pub mod auth;
pub mod graph;
pub mod group;
pub mod notification;
pub mod post;
pub mod profile;
pub mod project;

pub use error::{Error, Result};

/// Read-side operations.
pub struct Query;

/// Write-side operations.
pub struct Mutation;
