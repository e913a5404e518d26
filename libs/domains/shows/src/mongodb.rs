//! MongoDB implementation of ShowRepository

use async_trait::async_trait;
use database::mongodb::DocumentCollection;
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use mongodb::{
    Database,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::ShowResult;
use crate::models::{ChecklistItem, NewShow, Show, ShowUpdate};
use crate::repository::ShowRepository;

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "wotb_shows";

/// MongoDB implementation of the ShowRepository
#[derive(Clone, Debug)]
pub struct MongoShowRepository {
    shows: DocumentCollection,
}

impl MongoShowRepository {
    /// Repository over the `wotb_shows` collection of `db`
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoShowRepository::new(&client.database("shows"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            shows: DocumentCollection::new(db, collection_name),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.shows.name()
    }

    /// Lazily decode every stored show.
    ///
    /// Each element is decoded as it is pulled; a bad document yields an
    /// error element rather than ending the stream.
    pub async fn stream_shows(&self) -> ShowResult<BoxStream<'static, ShowResult<Show>>> {
        let documents = self.shows.find_all(None).await?;
        Ok(documents
            .map(|document| Show::from_document(&document?))
            .boxed())
    }

    fn decode(document: Option<Document>) -> ShowResult<Option<Show>> {
        document.as_ref().map(Show::from_document).transpose()
    }
}

#[async_trait]
impl ShowRepository for MongoShowRepository {
    #[instrument(skip(self), fields(collection = %self.collection_name()))]
    async fn list_shows(&self) -> ShowResult<Vec<Show>> {
        self.stream_shows().await?.try_collect().await
    }

    #[instrument(skip(self, input), fields(venue = %input.venue_name))]
    async fn create_show(&self, input: NewShow) -> ShowResult<String> {
        let id = self.shows.insert(input.to_document(), None).await?;
        tracing::info!(show_id = %id, "Show created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_show(&self, id: ObjectId) -> ShowResult<Option<Show>> {
        Self::decode(self.shows.find_by_id(&id, None).await?)
    }

    #[instrument(skip(self))]
    async fn delete_show(&self, id: ObjectId) -> ShowResult<bool> {
        let deleted = self.shows.delete_by_id(&id, None).await?;
        if deleted {
            tracing::info!(show_id = %id, "Show deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn add_item(&self, show_id: ObjectId, label: String) -> ShowResult<Option<Show>> {
        let item = ChecklistItem::new(label);
        let update = doc! { "$push": { "items": item.to_document() } };
        let show = Self::decode(self.shows.find_and_update(&show_id, update, None).await?)?;
        if show.is_some() {
            tracing::info!(show_id = %show_id, item_id = %item.id, "Item added");
        }
        Ok(show)
    }

    #[instrument(skip(self, update))]
    async fn update_show(
        &self,
        show_id: ObjectId,
        update: ShowUpdate,
    ) -> ShowResult<Option<Show>> {
        let set = update.to_set_document();
        if set.is_empty() {
            return self.get_show(show_id).await;
        }

        let fields: Vec<String> = set.keys().cloned().collect();
        let show = Self::decode(
            self.shows
                .find_and_update(&show_id, doc! { "$set": set }, None)
                .await?,
        )?;
        if show.is_some() {
            tracing::info!(show_id = %show_id, ?fields, "Show updated");
        }
        Ok(show)
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, show_id: ObjectId, item_id: String) -> ShowResult<Option<Show>> {
        let update = doc! { "$pull": { "items": { "id": item_id } } };
        Self::decode(self.shows.find_and_update(&show_id, update, None).await?)
    }
}

