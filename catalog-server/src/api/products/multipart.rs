//! Product multipart form parsing and upload storage
//!
//! Create/update requests arrive as multipart: text fields, a repeated
//! `categories` field, a `keep_existing_images` flag and up to
//! [`MAX_FILES_PER_PRODUCT`] `images` files.

use std::fs;
use std::path::Path;

use axum::extract::Multipart;
use uuid::Uuid;

use crate::utils::AppError;

/// Maximum size per uploaded image (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum number of images per product
pub const MAX_FILES_PER_PRODUCT: usize = 10;

/// Request body cap for the multipart routes: all files plus form fields
pub const MAX_UPLOAD_BODY: usize = MAX_FILES_PER_PRODUCT * MAX_FILE_SIZE + 1024 * 1024;

/// One uploaded image, held in memory until the transaction commits
#[derive(Debug)]
pub struct ImageUpload {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Parsed product form
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub series: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub dealer_price: Option<f64>,
    pub end_user_price: Option<f64>,
    pub warranty: Option<String>,
    pub product_type: Option<String>,
    pub categories: Vec<String>,
    pub keep_existing_images: bool,
    pub images: Vec<ImageUpload>,
}

/// Parse the multipart product form, validating image count, size and type
pub async fn parse_product_form(multipart: &mut Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        match name.as_str() {
            "images" => {
                if form.images.len() >= MAX_FILES_PER_PRODUCT {
                    return Err(AppError::validation(format!(
                        "Too many images, maximum is {MAX_FILES_PER_PRODUCT}"
                    )));
                }

                let original_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());

                let content_type = field.content_type().map(|s| s.to_string());
                if !content_type
                    .as_deref()
                    .is_some_and(|ct| ct.starts_with("image/"))
                {
                    return Err(AppError::validation("Only image files are allowed"));
                }

                let data = field.bytes().await?.to_vec();
                if data.is_empty() {
                    return Err(AppError::validation("Empty file provided"));
                }
                if data.len() > MAX_FILE_SIZE {
                    return Err(AppError::validation(format!(
                        "File too large. Maximum size is {}MB",
                        MAX_FILE_SIZE / 1024 / 1024
                    )));
                }

                form.images.push(ImageUpload {
                    original_name,
                    data,
                });
            }
            "categories" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    form.categories.push(value.trim().to_string());
                }
            }
            "keep_existing_images" => {
                form.keep_existing_images = field.text().await? == "true";
            }
            "dealer_price" => form.dealer_price = parse_price(&field.text().await?, "dealer_price")?,
            "end_user_price" => {
                form.end_user_price = parse_price(&field.text().await?, "end_user_price")?
            }
            "name" => form.name = non_empty(field.text().await?),
            "brand" => form.brand = non_empty(field.text().await?),
            "series" => form.series = non_empty(field.text().await?),
            "model" => form.model = non_empty(field.text().await?),
            "serial_number" => form.serial_number = non_empty(field.text().await?),
            "description" => form.description = non_empty(field.text().await?),
            "warranty" => form.warranty = non_empty(field.text().await?),
            "product_type" => form.product_type = non_empty(field.text().await?),
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_price(value: &str, field: &str) -> Result<Option<f64>, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let price: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a number")))?;
    if price < 0.0 {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(Some(price))
}

/// Write uploads to storage under generated names, returning the stored
/// file names in upload order. Files are written before the database
/// transaction; the caller removes them again if the transaction fails.
pub fn save_images(uploads_dir: &Path, images: &[ImageUpload]) -> Result<Vec<String>, AppError> {
    fs::create_dir_all(uploads_dir)
        .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {e}")))?;

    let mut saved = Vec::with_capacity(images.len());
    for image in images {
        let ext = Path::new(&image.original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "jpg".to_string());
        let filename = format!("{}.{ext}", Uuid::new_v4());

        fs::write(uploads_dir.join(&filename), &image.data).map_err(|e| {
            // Don't leave earlier files of the same request behind
            remove_files(uploads_dir, &saved);
            AppError::internal(format!("Failed to save file: {e}"))
        })?;
        saved.push(filename);
    }
    Ok(saved)
}

/// Best-effort removal of stored uploads after a failed transaction
pub fn remove_files(uploads_dir: &Path, filenames: &[String]) {
    for filename in filenames {
        if let Err(e) = fs::remove_file(uploads_dir.join(filename)) {
            tracing::warn!(file = %filename, error = %e, "Failed to remove orphaned upload");
        }
    }
}
