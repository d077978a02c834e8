//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::YesDevClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use yesdev_mcp::{YesDevClient, Project, Get};
///
/// let client = YesDevClient::from_env()?;
/// let project = Project::get(&client, 1024).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the service reports a failure, returns no data,
    /// or the request fails.
    async fn get(client: &YesDevClient, id: Self::Id) -> Result<Self>;
}
