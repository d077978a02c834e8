//! Trait definitions for YesDev operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! the service name and payload shape in the implementations.

mod create;
mod get;
mod list;
mod remove;
mod update;

pub use create::Create;
pub use get::Get;
pub use list::List;
pub use remove::Remove;
pub use update::Update;
