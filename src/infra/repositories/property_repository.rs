//! Property repository implementation.
//!
//! Every read eagerly joins the owner row so listings can be rendered
//! without a second lookup.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::entities::property::{self, into_domain, ActiveModel, Entity as PropertyEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{NewProperty, Property, PropertyStatus, SearchCriteria};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Property repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find listing by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Property>>;

    /// All listings regardless of status, newest first
    async fn list(&self) -> AppResult<Vec<Property>>;

    /// Listings with exactly this status
    async fn list_by_status(&self, status: PropertyStatus) -> AppResult<Vec<Property>>;

    /// Listings matching every supplied criterion
    async fn search(&self, criteria: SearchCriteria) -> AppResult<Vec<Property>>;

    /// Insert a new listing owned by `owner_id`
    async fn create(
        &self,
        owner_id: Uuid,
        listing: NewProperty,
        image_url: Option<String>,
    ) -> AppResult<Property>;

    /// Persist the editable fields (title through image URL) of a listing
    async fn save(&self, property: Property) -> AppResult<Property>;

    /// Overwrite the status column; returns false when no row matched
    async fn update_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool>;

    /// Delete by ID; deleting a missing listing is a no-op
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Count all listings
    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed property repository
pub struct PropertyStore {
    db: DatabaseConnection,
}

impl PropertyStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<PropertyEntity>) -> AppResult<Vec<Property>> {
        let rows = query
            .find_also_related(UserEntity)
            .order_by_desc(property::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(listing, owner)| into_domain(listing, owner))
            .collect())
    }
}

/// Build the filter for a search: case-insensitive substring on location,
/// inclusive upper bound on price, exact type.
fn search_condition(criteria: &SearchCriteria) -> Condition {
    let mut condition = Condition::all();

    if let Some(location) = &criteria.location {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col((
                PropertyEntity,
                property::Column::Location,
            ))))
            .like(format!("%{}%", location.to_lowercase())),
        );
    }
    if let Some(max_price) = criteria.max_price {
        condition = condition.add(property::Column::Price.lte(max_price));
    }
    if let Some(property_type) = &criteria.property_type {
        condition = condition.add(property::Column::PropertyType.eq(property_type.as_str()));
    }

    condition
}

#[async_trait]
impl PropertyRepository for PropertyStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Property>> {
        let row = PropertyEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(listing, owner)| into_domain(listing, owner)))
    }

    async fn list(&self) -> AppResult<Vec<Property>> {
        self.fetch(PropertyEntity::find()).await
    }

    async fn list_by_status(&self, status: PropertyStatus) -> AppResult<Vec<Property>> {
        self.fetch(PropertyEntity::find().filter(property::Column::Status.eq(status.as_str())))
            .await
    }

    async fn search(&self, criteria: SearchCriteria) -> AppResult<Vec<Property>> {
        self.fetch(PropertyEntity::find().filter(search_condition(&criteria)))
            .await
    }

    async fn create(
        &self,
        owner_id: Uuid,
        listing: NewProperty,
        image_url: Option<String>,
    ) -> AppResult<Property> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(listing.title),
            description: Set(listing.description),
            price: Set(listing.price),
            property_type: Set(listing.property_type),
            location: Set(listing.location),
            image_url: Set(image_url),
            status: Set(listing.status.unwrap_or_default().as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            owner_id: Set(owner_id),
        };

        let model = active_model.insert(&self.db).await?;
        let owner = UserEntity::find_by_id(owner_id).one(&self.db).await?;
        Ok(into_domain(model, owner))
    }

    async fn save(&self, property: Property) -> AppResult<Property> {
        let existing = PropertyEntity::find_by_id(property.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Property", property.id))?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(property.title);
        active.description = Set(property.description);
        active.price = Set(property.price);
        active.property_type = Set(property.property_type);
        active.location = Set(property.location);
        active.image_url = Set(property.image_url);

        let model = active.update(&self.db).await?;
        let owner = UserEntity::find_by_id(model.owner_id).one(&self.db).await?;
        Ok(into_domain(model, owner))
    }

    async fn update_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let result = PropertyEntity::update_many()
            .col_expr(property::Column::Status, Expr::value(status.as_str()))
            .filter(property::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = PropertyEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            tracing::debug!(property_id = %id, "Delete of missing property ignored");
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(PropertyEntity::find().count(&self.db).await?)
    }
}
