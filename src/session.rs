// src/session.rs
//! Working state of one creative flow: selected images, options and the
//! editable marketing draft. Nothing here outlives the flow.
//!
//! Callers must not start a second analysis or a second generation for the
//! same session while one is outstanding; the two operations are independent.
use crate::errors::AdsmithError;
use crate::models::{
    ContentWriterMode, CreativeOptions, EncodedImage, GenerationRequest, MarketingDraft,
    ReferenceImages,
};
use crate::services::generation_client::bundle_context;
use crate::services::prompt_composer::build_generation_request;

#[derive(Debug, Clone, Default)]
pub struct AdSession {
    pub images: ReferenceImages,
    pub options: CreativeOptions,
    pub draft: MarketingDraft,
}

impl AdSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes images up to capacity; a changed product set invalidates the draft.
    pub fn add_product_images(&mut self, images: impl IntoIterator<Item = EncodedImage>) -> usize {
        let added = self.images.add_products(images);
        if added > 0 {
            self.clear_draft();
        }
        added
    }

    pub fn remove_product_image(&mut self, index: usize) -> Option<EncodedImage> {
        let removed = self.images.remove_product(index);
        if removed.is_some() {
            self.clear_draft();
        }
        removed
    }

    pub fn clear_images(&mut self) {
        self.images.clear_products();
        self.clear_draft();
    }

    pub fn set_logo(&mut self, logo: EncodedImage) {
        self.images.logo = Some(logo);
        self.options.branding.include_logo = true;
    }

    pub fn set_face_reference(&mut self, face: EncodedImage) {
        self.images.face_reference = Some(face);
    }

    /// Image and context for the analysis call, if there is a product image.
    pub fn analysis_input(&self) -> Option<(&EncodedImage, String)> {
        self.images
            .products
            .first()
            .map(|image| (image, bundle_context(self.images.products.len())))
    }

    /// Stores an analysis result; a visual hook switches the writer to text mode.
    pub fn apply_draft(&mut self, draft: MarketingDraft) {
        let writer = &mut self.options.content_writer;
        writer.product_name = draft.product_name.clone();
        writer.ad_hook = draft.visual_hook.clone();
        if !draft.visual_hook.is_empty() {
            writer.mode = ContentWriterMode::WriteText;
        }
        self.draft = draft;
    }

    pub fn clear_draft(&mut self) {
        self.draft = MarketingDraft::default();
        self.options.content_writer.product_name.clear();
        self.options.content_writer.ad_hook.clear();
    }

    pub fn generation_request(&self) -> Result<GenerationRequest, AdsmithError> {
        build_generation_request(&self.options, &self.images)
    }
}
