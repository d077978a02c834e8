//! Tool handlers, one module per YesDev domain.
//!
//! Each handler is an inherent method on [`YesDevServer`](super::YesDevServer)
//! that performs exactly one remote call.

mod common;
mod daily;
mod need;
mod problem;
mod project;
mod task;
