//! Remove trait for deleting entities.

use async_trait::async_trait;

use crate::client::YesDevClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Remove: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the service reports a failure or the request fails.
    async fn remove(client: &YesDevClient, id: Self::Id) -> Result<()>;
}
