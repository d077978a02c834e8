//! List trait for querying collections of entities.

use async_trait::async_trait;

use crate::client::YesDevClient;
use crate::error::Result;
use crate::pagination::Page;

/// Query entities with service-side filtering.
///
/// Each call is exactly one round trip; the service decides paging and
/// grouping.
///
/// # Example
///
/// ```ignore
/// use yesdev_mcp::{YesDevClient, Need, NeedQuery, List};
///
/// let client = YesDevClient::from_env()?;
/// let page = Need::list(&client, &NeedQuery::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the service reports a failure or the request fails.
    async fn list(client: &YesDevClient, query: &Self::Query) -> Result<Page<Self>>;
}
