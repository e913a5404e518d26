use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ShowResult;
use crate::models::{NewShow, Show, ShowUpdate};

/// Repository trait for Show persistence
///
/// Absence is reported as `None`/`false`, never as an error; turning it into
/// NotFound is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// Every stored show; the first undecodable document fails the call
    async fn list_shows(&self) -> ShowResult<Vec<Show>>;

    /// Insert a show with no items and return its id
    async fn create_show(&self, input: NewShow) -> ShowResult<String>;

    async fn get_show(&self, id: ObjectId) -> ShowResult<Option<Show>>;

    /// `true` iff a show was removed
    async fn delete_show(&self, id: ObjectId) -> ShowResult<bool>;

    /// Append an unchecked item with a fresh id
    async fn add_item(&self, show_id: ObjectId, label: String) -> ShowResult<Option<Show>>;

    /// Set exactly the fields present in `update`, without validating them
    async fn update_show(&self, show_id: ObjectId, update: ShowUpdate)
    -> ShowResult<Option<Show>>;

    /// Remove the item with `item_id`; a missing item leaves the show unchanged
    async fn remove_item(&self, show_id: ObjectId, item_id: String) -> ShowResult<Option<Show>>;
}
