//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::YesDevClient;
use crate::error::Result;

/// Update an existing entity.
///
/// The parameters carry the entity ID; only fields that are set are sent.
///
/// # Example
///
/// ```ignore
/// use yesdev_mcp::{YesDevClient, Project, UpdateProjectParams, Update};
///
/// let client = YesDevClient::from_env()?;
/// Project::update(
///     &client,
///     UpdateProjectParams {
///         id: 1024,
///         project_name: Some("New Name".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// Parameters for the update, including the ID.
    type Params: Send;

    /// Apply the update.
    ///
    /// # Errors
    ///
    /// Returns an error if the service reports a failure or the request fails.
    async fn update(client: &YesDevClient, params: Self::Params) -> Result<()>;
}
