//! Create trait for adding entities.

use async_trait::async_trait;

use crate::client::YesDevClient;
use crate::error::Result;
use crate::models::Created;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use yesdev_mcp::{YesDevClient, Task, CreateTaskParams, Create};
///
/// let client = YesDevClient::from_env()?;
/// let created = Task::create(&client, CreateTaskParams::titled("写周报")).await?;
/// println!("task {}", created.id);
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the creation.
    type Params: Send;

    /// Create the entity and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the entity or the request fails.
    async fn create(client: &YesDevClient, params: Self::Params) -> Result<Created>;
}
