//! Multipart listing form (`/properties/save`, `/properties/update`).

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use super::validated_json::format_validation_errors;
use crate::domain::{
    parse_price, ImageUpload, NewProperty, OwnerContact, PropertyChanges, PropertyStatus,
};
use crate::errors::{AppError, AppResult, PageError};

/// Listing fields plus the optional `imageFile` part.
#[derive(Debug, Default, Validate)]
pub struct PropertyForm {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub property_type: String,
    pub location: String,
    pub status: Option<PropertyStatus>,
    pub owner_full_name: Option<String>,
    #[validate(email(message = "Invalid owner email"))]
    pub owner_email: Option<String>,
    pub image: Option<ImageUpload>,
}

impl PropertyForm {
    /// Fields of a new submission and its image
    pub fn into_new_property(self) -> (NewProperty, Option<ImageUpload>) {
        let listing = NewProperty {
            title: self.title,
            description: self.description,
            price: self.price,
            property_type: self.property_type,
            location: self.location,
            status: self.status,
        };
        (listing, self.image)
    }

    /// Target ID, edits and image of an update; the ID is mandatory here
    pub fn into_changes(self) -> AppResult<(Uuid, PropertyChanges, Option<ImageUpload>)> {
        let id = self
            .id
            .ok_or_else(|| AppError::BadRequest("Missing property id".to_string()))?;

        let owner = match (self.owner_full_name, self.owner_email) {
            (None, None) => None,
            (full_name, email) => Some(OwnerContact {
                full_name: full_name.unwrap_or_default(),
                email: email.unwrap_or_default(),
            }),
        };

        let changes = PropertyChanges {
            title: self.title,
            description: self.description,
            price: self.price,
            property_type: self.property_type,
            location: self.location,
            owner,
        };
        Ok((id, changes, self.image))
    }

    fn set_text(&mut self, name: &str, value: String) -> AppResult<()> {
        let trimmed = value.trim();
        let non_blank = (!trimmed.is_empty()).then(|| trimmed.to_string());

        match name {
            "id" => {
                self.id = non_blank
                    .map(|v| Uuid::parse_str(&v))
                    .transpose()
                    .map_err(|_| AppError::BadRequest("Invalid property id".to_string()))?;
            }
            "title" => self.title = trimmed.to_string(),
            "description" => self.description = value,
            "price" => {
                self.price = non_blank
                    .map(|v| parse_price(&v))
                    .transpose()
                    .map_err(AppError::validation)?;
            }
            "type" => self.property_type = trimmed.to_string(),
            "location" => self.location = trimmed.to_string(),
            "status" => {
                self.status = non_blank
                    .map(|v| {
                        PropertyStatus::parse(&v)
                            .ok_or_else(|| AppError::validation(format!("Unknown status: {}", v)))
                    })
                    .transpose()?;
            }
            "ownerFullName" => self.owner_full_name = Some(trimmed.to_string()),
            "ownerEmail" => self.owner_email = non_blank,
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
        Ok(())
    }
}

/// Map multipart failures; the body limit surfaces as 413.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}

async fn read_file(field: Field<'_>) -> AppResult<ImageUpload> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    Ok(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

#[async_trait]
impl<S> FromRequest<S> for PropertyForm
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;

        let mut form = PropertyForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "imageFile" {
                form.image = Some(read_file(field).await?);
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.set_text(&name, value)?;
            }
        }

        form.validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_price_and_status_are_absent() {
        let mut form = PropertyForm::default();
        form.set_text("price", "  ".to_string()).unwrap();
        form.set_text("status", String::new()).unwrap();
        assert_eq!(form.price, None);
        assert_eq!(form.status, None);
    }

    #[test]
    fn bad_price_is_a_validation_error() {
        let mut form = PropertyForm::default();
        assert!(matches!(
            form.set_text("price", "cheap".to_string()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn non_finite_price_is_a_validation_error() {
        let mut form = PropertyForm::default();
        for raw in ["NaN", "inf"] {
            assert!(matches!(
                form.set_text("price", raw.to_string()),
                Err(AppError::Validation(_))
            ));
        }
        assert_eq!(form.price, None);
    }

    #[test]
    fn update_requires_id_and_collects_owner_contact() {
        let mut form = PropertyForm::default();
        form.set_text("title", "Villa".to_string()).unwrap();
        assert!(form.into_changes().is_err());

        let mut form = PropertyForm::default();
        let id = Uuid::new_v4();
        form.set_text("id", id.to_string()).unwrap();
        form.set_text("ownerFullName", "Olga".to_string()).unwrap();
        form.set_text("ownerEmail", "olga@mail.com".to_string()).unwrap();

        let (parsed, changes, image) = form.into_changes().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(changes.owner.unwrap().email, "olga@mail.com");
        assert!(image.is_none());
    }

    #[test]
    fn missing_title_fails_validation() {
        let form = PropertyForm::default();
        assert!(form.validate().is_err());
    }
}
