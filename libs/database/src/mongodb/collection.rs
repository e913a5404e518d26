//! Collection-scoped CRUD primitives over raw BSON documents.

use ::mongodb::{
    ClientSession, Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use tracing::instrument;

use crate::common::{DatabaseError, DatabaseResult};

/// Lazy, single-pass stream of raw documents
pub type DocumentStream<'a> = BoxStream<'a, DatabaseResult<Document>>;

/// Typed handle to one collection of schema-flexible documents.
///
/// Every primitive accepts an optional [`ClientSession`] and hands it to the
/// driver untouched, so callers can run several primitives inside their own
/// transaction. Cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct DocumentCollection {
    inner: Collection<Document>,
}

impl DocumentCollection {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            inner: db.collection::<Document>(name),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Every document in the collection, unfiltered and unpaginated.
    ///
    /// Order is whatever the server returns. The stream pulls batches as it
    /// is polled and cannot be restarted.
    #[instrument(skip_all, fields(collection = %self.name()))]
    pub async fn find_all<'a>(
        &self,
        session: Option<&'a mut ClientSession>,
    ) -> DatabaseResult<DocumentStream<'a>> {
        match session {
            None => {
                let cursor = self.inner.find(doc! {}).await?;
                Ok(cursor.map_err(DatabaseError::from).boxed())
            }
            Some(session) => {
                let cursor = self.inner.find(doc! {}).session(&mut *session).await?;
                let stream = futures::stream::unfold(
                    (cursor, session),
                    |(mut cursor, session)| async move {
                        let next = cursor.next(session).await?;
                        Some((next.map_err(DatabaseError::from), (cursor, session)))
                    },
                );
                Ok(stream.boxed())
            }
        }
    }

    /// Exact `_id` match; `None` when nothing matches
    #[instrument(skip(self, session), fields(collection = %self.name()))]
    pub async fn find_by_id(
        &self,
        id: &ObjectId,
        session: Option<&mut ClientSession>,
    ) -> DatabaseResult<Option<Document>> {
        let mut action = self.inner.find_one(doc! { "_id": *id });
        if let Some(session) = session {
            action = action.session(session);
        }
        Ok(action.await?)
    }

    /// Insert `fields` as a new document and return the generated `_id` as text
    #[instrument(skip_all, fields(collection = %self.name()))]
    pub async fn insert(
        &self,
        fields: Document,
        session: Option<&mut ClientSession>,
    ) -> DatabaseResult<String> {
        let mut action = self.inner.insert_one(fields);
        if let Some(session) = session {
            action = action.session(session);
        }
        let result = action.await?;
        Ok(id_to_string(result.inserted_id))
    }

    /// Atomically apply `update` (`$set`, `$push`, `$pull`, ...) to the document
    /// with `id` and return its post-update state; `None` when `id` is absent.
    #[instrument(skip(self, update, session), fields(collection = %self.name()))]
    pub async fn find_and_update(
        &self,
        id: &ObjectId,
        update: Document,
        session: Option<&mut ClientSession>,
    ) -> DatabaseResult<Option<Document>> {
        let mut action = self
            .inner
            .find_one_and_update(doc! { "_id": *id }, update)
            .return_document(ReturnDocument::After);
        if let Some(session) = session {
            action = action.session(session);
        }
        Ok(action.await?)
    }

    /// `true` iff exactly one document was removed
    #[instrument(skip(self, session), fields(collection = %self.name()))]
    pub async fn delete_by_id(
        &self,
        id: &ObjectId,
        session: Option<&mut ClientSession>,
    ) -> DatabaseResult<bool> {
        let mut action = self.inner.delete_one(doc! { "_id": *id });
        if let Some(session) = session {
            action = action.session(session);
        }
        let result = action.await?;
        Ok(result.deleted_count == 1)
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
