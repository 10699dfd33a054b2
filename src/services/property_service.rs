//! Property service - Listing submission, edits and admin moderation.
//!
//! Moderation is a plain status overwrite; any status may follow any other.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::ImageService;
use crate::domain::{
    normalize_email, valid_price, ImageUpload, NewProperty, Property, PropertyChanges,
    PropertyStatus, SearchCriteria,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Property service trait for dependency injection.
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Submit a listing owned by the account with `owner_email`.
    ///
    /// Status defaults to pending; a non-empty image is uploaded first.
    async fn create(
        &self,
        listing: NewProperty,
        owner_email: &str,
        image: Option<ImageUpload>,
    ) -> AppResult<Property>;

    /// Every listing irrespective of status
    async fn list_all(&self) -> AppResult<Vec<Property>>;

    /// Listings with exactly this status
    async fn list_by_status(&self, status: PropertyStatus) -> AppResult<Vec<Property>>;

    /// Listings matching all supplied criteria; no criteria means all listings
    async fn search(&self, criteria: SearchCriteria) -> AppResult<Vec<Property>>;

    /// Single listing, `None` when absent
    async fn get(&self, id: Uuid) -> AppResult<Option<Property>>;

    /// Apply owner edits; status is left untouched
    async fn update(
        &self,
        id: Uuid,
        changes: PropertyChanges,
        image: Option<ImageUpload>,
    ) -> AppResult<Property>;

    /// Overwrite the status; returns whether the listing existed
    async fn set_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool>;

    /// Shorthand for `set_status(id, Approved)`
    async fn approve(&self, id: Uuid) -> AppResult<bool> {
        self.set_status(id, PropertyStatus::Approved).await
    }

    /// Shorthand for `set_status(id, Rejected)`
    async fn reject(&self, id: Uuid) -> AppResult<bool> {
        self.set_status(id, PropertyStatus::Rejected).await
    }

    /// Remove a listing; absent IDs are ignored
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Number of listings
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of PropertyService using Unit of Work.
pub struct PropertyManager<U: UnitOfWork> {
    uow: Arc<U>,
    images: Arc<dyn ImageService>,
}

impl<U: UnitOfWork> PropertyManager<U> {
    pub fn new(uow: Arc<U>, images: Arc<dyn ImageService>) -> Self {
        Self { uow, images }
    }

    /// Upload the image if one with content was supplied.
    async fn upload_if_present(&self, image: Option<ImageUpload>) -> AppResult<Option<String>> {
        match image.filter(|img| !img.is_empty()) {
            Some(img) => Ok(Some(self.images.upload(img).await?)),
            None => Ok(None),
        }
    }
}

fn ensure_price(price: Option<f64>) -> AppResult<()> {
    if valid_price(price) {
        Ok(())
    } else {
        Err(AppError::validation("Price must be a finite, non-negative number"))
    }
}

#[async_trait]
impl<U: UnitOfWork> PropertyService for PropertyManager<U> {
    async fn create(
        &self,
        listing: NewProperty,
        owner_email: &str,
        image: Option<ImageUpload>,
    ) -> AppResult<Property> {
        ensure_price(listing.price)?;

        let owner = self
            .uow
            .users()
            .find_by_email(&normalize_email(owner_email))
            .await?
            .ok_or_else(|| {
                tracing::warn!("Listing submitted by a session without an account");
                AppError::Unauthorized
            })?;

        let image_url = self.upload_if_present(image).await?;
        let property = self
            .uow
            .properties()
            .create(owner.id, listing, image_url)
            .await?;

        tracing::info!(
            property_id = %property.id,
            owner_id = %owner.id,
            status = %property.status,
            "Listing created"
        );
        Ok(property)
    }

    async fn list_all(&self) -> AppResult<Vec<Property>> {
        self.uow.properties().list().await
    }

    async fn list_by_status(&self, status: PropertyStatus) -> AppResult<Vec<Property>> {
        self.uow.properties().list_by_status(status).await
    }

    async fn search(&self, criteria: SearchCriteria) -> AppResult<Vec<Property>> {
        let criteria = criteria.normalized();
        if criteria.is_empty() {
            return self.list_all().await;
        }
        self.uow.properties().search(criteria).await
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Property>> {
        self.uow.properties().find_by_id(id).await
    }

    async fn update(
        &self,
        id: Uuid,
        changes: PropertyChanges,
        image: Option<ImageUpload>,
    ) -> AppResult<Property> {
        ensure_price(changes.price)?;

        let mut property = self
            .uow
            .properties()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Property", id))?;

        if let Some(contact) = changes.owner {
            match self.uow.users().find_by_id(property.owner_id).await? {
                Some(mut owner) => {
                    owner.full_name = contact.full_name.trim().to_string();
                    owner.email = normalize_email(&contact.email);
                    self.uow.users().save(owner).await?;
                }
                None => {
                    tracing::warn!(property_id = %id, "Owner record missing, contact edit skipped");
                }
            }
        }

        property.title = changes.title;
        property.description = changes.description;
        property.price = changes.price;
        property.property_type = changes.property_type;
        property.location = changes.location;

        if let Some(url) = self.upload_if_present(image).await? {
            property.image_url = Some(url);
        }

        let saved = self.uow.properties().save(property).await?;
        tracing::info!(property_id = %saved.id, "Listing updated");
        Ok(saved)
    }

    async fn set_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let found = self.uow.properties().update_status(id, status).await?;
        if found {
            tracing::info!(property_id = %id, status = %status, "Listing status changed");
        } else {
            tracing::warn!(property_id = %id, status = %status, "Status change for missing listing");
        }
        Ok(found)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.properties().delete(id).await?;
        tracing::info!(property_id = %id, "Listing deleted");
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        self.uow.properties().count().await
    }
}
