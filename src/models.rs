// src/models.rs
use crate::catalog;
use crate::errors::AdsmithError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_PRODUCT_IMAGES: usize = 8;

/// An image carried as a `data:<mime>;base64,<payload>` URI, kept split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl FromStr for EncodedImage {
    type Err = AdsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, data) = s
            .split_once(";base64,")
            .ok_or_else(|| AdsmithError::Validation("Image is not a base64 data URI".to_string()))?;
        let mime_type = head
            .strip_prefix("data:")
            .ok_or_else(|| AdsmithError::Validation("Image data URI must start with data:".to_string()))?;
        if mime_type.is_empty() || data.is_empty() {
            return Err(AdsmithError::Validation(
                "Image data URI has an empty MIME type or payload".to_string(),
            ));
        }
        Ok(Self::new(mime_type, data))
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = AdsmithError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.to_data_uri()
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceImages {
    pub products: Vec<EncodedImage>,
    pub logo: Option<EncodedImage>,
    pub face_reference: Option<EncodedImage>,
}

impl ReferenceImages {
    pub fn remaining_slots(&self) -> usize {
        MAX_PRODUCT_IMAGES.saturating_sub(self.products.len())
    }

    /// Adds images up to capacity and returns how many were taken.
    pub fn add_products(&mut self, images: impl IntoIterator<Item = EncodedImage>) -> usize {
        let slots = self.remaining_slots();
        let before = self.products.len();
        self.products.extend(images.into_iter().take(slots));
        self.products.len() - before
    }

    pub fn remove_product(&mut self, index: usize) -> Option<EncodedImage> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }

    pub fn clear_products(&mut self) {
        self.products.clear();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentWriterMode {
    WriteText,
    #[default]
    WithoutText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentWriterOptions {
    pub mode: ContentWriterMode,
    pub ad_hook: String,
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaOptions {
    pub enabled: bool,
    pub style_id: String,
    pub text: String,
}

impl Default for CtaOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            style_id: catalog::DEFAULT_CTA_STYLE_ID.to_string(),
            text: catalog::DEFAULT_CTA_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingOptions {
    pub include_logo: bool,
    pub include_watermark: bool,
    pub watermark_text: String,
}

impl Default for BrandingOptions {
    fn default() -> Self {
        Self {
            include_logo: false,
            include_watermark: false,
            watermark_text: catalog::DEFAULT_WATERMARK_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelShotOptions {
    pub model_type_id: String,
    pub scenario_type_id: String,
    pub pose: String,
}

impl Default for ModelShotOptions {
    fn default() -> Self {
        Self {
            model_type_id: catalog::DEFAULT_MODEL_TYPE_ID.to_string(),
            scenario_type_id: catalog::DEFAULT_SCENARIO_TYPE_ID.to_string(),
            pose: String::new(),
        }
    }
}

/// Everything the user picked for one creative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeOptions {
    pub mode_id: String,
    pub size_id: String,
    pub aesthetic_id: String,
    pub content_writer: ContentWriterOptions,
    pub cta: CtaOptions,
    pub branding: BrandingOptions,
    pub model_shot: ModelShotOptions,
}

impl Default for CreativeOptions {
    fn default() -> Self {
        Self {
            mode_id: catalog::DEFAULT_MODE_ID.to_string(),
            size_id: catalog::DEFAULT_SIZE_ID.to_string(),
            aesthetic_id: catalog::DEFAULT_AESTHETIC_ID.to_string(),
            content_writer: ContentWriterOptions::default(),
            cta: CtaOptions::default(),
            branding: BrandingOptions::default(),
            model_shot: ModelShotOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketingDraft {
    pub product_name: String,
    pub long_description: String,
    pub keywords: String,
    pub visual_hook: String,
}

/// Payload for one image-synthesis call. Product images come first, then
/// the logo, then the face reference.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<EncodedImage>,
    pub aspect_ratio: Option<String>,
}
