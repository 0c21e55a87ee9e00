use thiserror::Error;

/// Hard ceiling on accepted uploads.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Media types the service accepts; everything else is refused locally.
pub const ALLOWED_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Declared attributes of a staged file, as reported by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No image file selected.")]
    NoFile,
    #[error("File must be a JPG or PNG image.")]
    UnsupportedFormat,
    #[error("File size must be under 10MB.")]
    TooLarge,
}

/// Checks a candidate before it may be staged. Rules apply in order and the
/// first failure wins: presence, then media type, then size.
pub fn validate(file: Option<&FileMeta>) -> Result<(), ValidationError> {
    let file = file.ok_or(ValidationError::NoFile)?;

    if !ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Err(ValidationError::UnsupportedFormat);
    }

    if file.size_bytes > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge);
    }

    Ok(())
}
