//! Show Service - turns repository absence into NotFound and validates input

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ShowError, ShowResult};
use crate::models::{NewChecklistItem, NewShow, Show, ShowUpdate};
use crate::repository::ShowRepository;

/// Show service providing business logic operations
pub struct ShowService<R: ShowRepository> {
    repository: Arc<R>,
}

impl<R: ShowRepository> ShowService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_shows(&self) -> ShowResult<Vec<Show>> {
        self.repository.list_shows().await
    }

    /// Validate and persist a full show; returns the new id
    #[instrument(skip(self, input), fields(venue = %input.venue_name))]
    pub async fn create_show(&self, input: NewShow) -> ShowResult<String> {
        input.validate()?;
        self.repository.create_show(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_show(&self, id: ObjectId) -> ShowResult<Show> {
        self.repository
            .get_show(id)
            .await?
            .ok_or_else(|| ShowError::NotFound(id.to_hex()))
    }

    #[instrument(skip(self))]
    pub async fn delete_show(&self, id: ObjectId) -> ShowResult<()> {
        if self.repository.delete_show(id).await? {
            Ok(())
        } else {
            Err(ShowError::NotFound(id.to_hex()))
        }
    }

    /// Merge the present fields of `update` into the show
    #[instrument(skip(self, update))]
    pub async fn update_show(&self, id: ObjectId, update: ShowUpdate) -> ShowResult<Show> {
        update.validate()?;
        self.repository
            .update_show(id, update)
            .await?
            .ok_or_else(|| ShowError::NotFound(id.to_hex()))
    }

    #[instrument(skip(self, input))]
    pub async fn add_item(&self, show_id: ObjectId, input: NewChecklistItem) -> ShowResult<Show> {
        input.validate()?;
        self.repository
            .add_item(show_id, input.label)
            .await?
            .ok_or_else(|| ShowError::NotFound(show_id.to_hex()))
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, show_id: ObjectId, item_id: String) -> ShowResult<Show> {
        self.repository
            .remove_item(show_id, item_id)
            .await?
            .ok_or_else(|| ShowError::NotFound(show_id.to_hex()))
    }
}

impl<R: ShowRepository> Clone for ShowService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Address, ChecklistItem};
    use crate::repository::MockShowRepository;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    pub(crate) fn new_show() -> NewShow {
        NewShow {
            venue_name: "Venue X".into(),
            address: Address {
                house_number: "1200".into(),
                street_name: "Main St".into(),
                zipcode: "78701".into(),
                city: "Austin".into(),
                state: "TX".into(),
            },
            other_bands: Some(vec!["The Openers".into()]),
            entry_time: None,
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap(),
            end_time: None,
            timezone: "America/Chicago".into(),
            ticket_link: None,
            rvsp_link: None,
            fb_link: None,
            is_past: None,
        }
    }

    pub(crate) fn show(id: ObjectId, items: Vec<ChecklistItem>) -> Show {
        let new = new_show();
        Show {
            id: id.to_hex(),
            venue_name: new.venue_name,
            address: new.address,
            other_bands: new.other_bands,
            entry_time: new.entry_time,
            start_time: new.start_time,
            end_time: new.end_time,
            timezone: new.timezone,
            ticket_link: new.ticket_link,
            rvsp_link: new.rvsp_link,
            fb_link: new.fb_link,
            is_past: new.is_past,
            items,
        }
    }

    #[tokio::test]
    async fn test_get_show_absent_is_not_found() {
        let mut mock_repo = MockShowRepository::new();
        let id = ObjectId::new();

        mock_repo
            .expect_get_show()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ShowService::new(mock_repo);
        let err = service.get_show(id).await.unwrap_err();

        assert!(matches!(err, ShowError::NotFound(ref s) if *s == id.to_hex()));
    }

    #[tokio::test]
    async fn test_get_show_found() {
        let mut mock_repo = MockShowRepository::new();
        let id = ObjectId::new();

        mock_repo
            .expect_get_show()
            .with(eq(id))
            .returning(move |id| Ok(Some(show(id, vec![]))));

        let service = ShowService::new(mock_repo);
        let found = service.get_show(id).await.unwrap();

        assert_eq!(found.id, id.to_hex());
    }

    #[tokio::test]
    async fn test_create_show_rejects_invalid_input_without_touching_store() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_create_show().never();

        let mut input = new_show();
        input.timezone = "Central".into();

        let service = ShowService::new(mock_repo);
        let err = service.create_show(input).await.unwrap_err();

        assert!(matches!(err, ShowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_show_returns_store_id() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo
            .expect_create_show()
            .times(1)
            .returning(|_| Ok("65f0c0ffee0000000000beef".to_string()));

        let service = ShowService::new(mock_repo);
        let id = service.create_show(new_show()).await.unwrap();

        assert_eq!(id, "65f0c0ffee0000000000beef");
    }

    #[tokio::test]
    async fn test_delete_show_missing_is_not_found() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_delete_show().returning(|_| Ok(false));

        let service = ShowService::new(mock_repo);
        let err = service.delete_show(ObjectId::new()).await.unwrap_err();

        assert!(matches!(err, ShowError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_show_validates_present_fields() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_update_show().never();

        let update = ShowUpdate {
            venue_name: Some(String::new()),
            ..Default::default()
        };

        let service = ShowService::new(mock_repo);
        let err = service.update_show(ObjectId::new(), update).await.unwrap_err();

        assert!(matches!(err, ShowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_show_missing_is_not_found() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_update_show().returning(|_, _| Ok(None));

        let update = ShowUpdate {
            venue_name: Some("Venue Y".into()),
            ..Default::default()
        };

        let service = ShowService::new(mock_repo);
        let err = service.update_show(ObjectId::new(), update).await.unwrap_err();

        assert!(matches!(err, ShowError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_item_passes_label_through() {
        let mut mock_repo = MockShowRepository::new();
        let id = ObjectId::new();

        mock_repo
            .expect_add_item()
            .with(eq(id), eq("Soundcheck".to_string()))
            .returning(|id, label| Ok(Some(show(id, vec![ChecklistItem::new(label)]))));

        let service = ShowService::new(mock_repo);
        let updated = service
            .add_item(
                id,
                NewChecklistItem {
                    label: "Soundcheck".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 1);
        assert!(!updated.items[0].checked);
    }

    #[tokio::test]
    async fn test_add_item_rejects_empty_label() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_add_item().never();

        let service = ShowService::new(mock_repo);
        let err = service
            .add_item(ObjectId::new(), NewChecklistItem { label: String::new() })
            .await
            .unwrap_err();

        assert!(matches!(err, ShowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_remove_item_on_missing_show_is_not_found() {
        let mut mock_repo = MockShowRepository::new();
        mock_repo.expect_remove_item().returning(|_, _| Ok(None));

        let service = ShowService::new(mock_repo);
        let err = service
            .remove_item(ObjectId::new(), "abc".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ShowError::NotFound(_)));
    }
}
