//! # API Route Modules
//!
//! Each submodule defines a `router()` function returning `Router<AppState>`.

pub mod termination;
