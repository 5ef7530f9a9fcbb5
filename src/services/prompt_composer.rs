// src/services/prompt_composer.rs
//! Maps a selected option set onto the final generation prompt.
//!
//! Composition never fails once the mode and size are resolved: a missing
//! aesthetic, CTA style, model or scenario degrades to a fallback fragment.
use crate::catalog::{self, AdSize, ModeKind, VisualMode};
use crate::errors::AdsmithError;
use crate::models::{
    ContentWriterMode, CreativeOptions, CtaOptions, GenerationRequest, MAX_PRODUCT_IMAGES,
    ReferenceImages,
};
use log::debug;

pub const NEGATIVE_CONSTRAINT: &str =
    "Do NOT display any prices, currency symbols, dollar signs, cost numbers, or price tags.";
pub const FALLBACK_HEADLINE: &str = "SPECIAL OFFER";
pub const FALLBACK_AESTHETIC_PROMPT: &str = "a professional, high-quality aesthetic";
pub const FALLBACK_AESTHETIC_NAME: &str = "professional";
pub const FALLBACK_CTA_PROMPT: &str = "a prominent, clearly legible button";
pub const FALLBACK_MODEL_PROMPT: &str = "a friendly, professional model";
pub const FALLBACK_SCENARIO_PROMPT: &str = "in a softly lit, neutral studio setting";
pub const DEFAULT_POSE: &str = "in a natural, candid pose, happily interacting with the product";
pub const ACTION_QUALIFIER: &str = "Use provided product images. High resolution.";
pub const LOGO_CLAUSE: &str = "Composite the provided logo image subtly in the top-right corner.";
pub const FACE_REFERENCE_CLAUSE: &str =
    "Use the **face reference image input** for the model's face.";

/// Which optional reference images are actually on hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetPresence {
    pub logo: bool,
    pub face_reference: bool,
}

impl From<&ReferenceImages> for AssetPresence {
    fn from(images: &ReferenceImages) -> Self {
        Self {
            logo: images.logo.is_some(),
            face_reference: images.face_reference.is_some(),
        }
    }
}

struct Aesthetic {
    name: &'static str,
    prompt: &'static str,
}

fn resolve_aesthetic(id: &str) -> Aesthetic {
    catalog::find_aesthetic(id)
        .map(|a| Aesthetic {
            name: a.name,
            prompt: a.prompt,
        })
        .unwrap_or(Aesthetic {
            name: FALLBACK_AESTHETIC_NAME,
            prompt: FALLBACK_AESTHETIC_PROMPT,
        })
}

/// Headline rendered in write-text mode: hook, then product name, then the fallback.
pub fn resolve_headline<'a>(ad_hook: &'a str, product_name: &'a str) -> &'a str {
    let hook = ad_hook.trim();
    if !hook.is_empty() {
        return hook;
    }
    let name = product_name.trim();
    if !name.is_empty() {
        return name;
    }
    FALLBACK_HEADLINE
}

fn content_writer_clause(options: &CreativeOptions, aesthetic_name: &str) -> String {
    let writer = &options.content_writer;
    match writer.mode {
        ContentWriterMode::WriteText => {
            let headline = resolve_headline(&writer.ad_hook, &writer.product_name);
            format!(
                "**TYPOGRAPHY INSTRUCTION**: You MUST render the text \"{headline}\" clearly and artistically on the image. \
                 Integrate the text into the composition using a font style that matches the {aesthetic_name} vibe. \
                 Ensure the text is legible, correctly spelled, and visually balanced."
            )
        }
        ContentWriterMode::WithoutText => "**NO TEXT INSTRUCTION**: Do NOT render any headlines, slogans, body copy, or floating text on the background. \
             Keep the composition clean of typography."
            .to_string(),
    }
}

fn cta_clause(cta: &CtaOptions) -> Option<String> {
    let text = cta.text.trim();
    if !cta.enabled || text.is_empty() {
        return None;
    }
    let style = catalog::find_cta_style(&cta.style_id)
        .map(|s| s.prompt)
        .unwrap_or(FALLBACK_CTA_PROMPT);
    Some(format!(
        "Integrate a clear **Call-to-Action (CTA)** button: \"{style}\". Text: \"{}\".",
        text.to_uppercase()
    ))
}

/// At most one branding clause; the logo wins over the watermark.
fn branding_clause(options: &CreativeOptions, assets: AssetPresence) -> Option<String> {
    let branding = &options.branding;
    if branding.include_logo && assets.logo {
        return Some(LOGO_CLAUSE.to_string());
    }
    let watermark = branding.watermark_text.trim();
    if branding.include_watermark && !watermark.is_empty() {
        return Some(format!(
            "Add text watermark \"{watermark}\" cleanly in the corner."
        ));
    }
    None
}

fn push_clause(prompt: &mut String, clause: Option<String>) {
    if let Some(clause) = clause {
        prompt.push(' ');
        prompt.push_str(&clause);
    }
}

fn combo_prompt(
    mode: &VisualMode,
    size: &AdSize,
    options: &CreativeOptions,
    assets: AssetPresence,
) -> String {
    let aesthetic = resolve_aesthetic(&options.aesthetic_id);
    let mut prompt = format!(
        "Generate an **ultra high-resolution, professional \"Combo/Collection\" product advertisement**.\n\
         The final image must have an aspect ratio of **{ratio}** (e.g., {pixels}).\n\
         **Layout**: {layout}\n\
         **Style**: Apply {style}.\n\
         **Content Writer**: {writer}\n\
         **Negative Constraint**: {NEGATIVE_CONSTRAINT}",
        ratio = size.ratio,
        pixels = size.pixel_hint,
        layout = mode.layout.unwrap_or_default(),
        style = aesthetic.prompt,
        writer = content_writer_clause(options, aesthetic.name),
    );
    push_clause(&mut prompt, cta_clause(&options.cta));
    push_clause(&mut prompt, branding_clause(options, assets));
    prompt
}

fn banner_prompt(
    mode: &VisualMode,
    size: &AdSize,
    options: &CreativeOptions,
    assets: AssetPresence,
) -> String {
    let aesthetic = resolve_aesthetic(&options.aesthetic_id);
    let mut prompt = format!(
        "Generate an **ultra high-resolution, photorealistic, high-impact** social media ad banner.\n\
         Aspect Ratio: **{ratio}** ({pixels}).\n\
         Focus: The product shown in the **input images**. Render a perfect, high-fidelity instance of it.\n\
         **Layout**: \"{layout}\".\n\
         **Style**: Infuse this with {style}.\n\
         **Content Writer**: {writer}\n\
         **Negative Constraint**: {NEGATIVE_CONSTRAINT}",
        ratio = size.ratio,
        pixels = size.pixel_hint,
        layout = mode.layout.unwrap_or_default(),
        style = aesthetic.prompt,
        writer = content_writer_clause(options, aesthetic.name),
    );
    push_clause(&mut prompt, cta_clause(&options.cta));
    push_clause(&mut prompt, branding_clause(options, assets));
    prompt
}

fn model_shot_prompt(
    mode: &VisualMode,
    size: &AdSize,
    options: &CreativeOptions,
    assets: AssetPresence,
) -> String {
    let aesthetic = resolve_aesthetic(&options.aesthetic_id);
    let shot = &options.model_shot;
    let model = catalog::find_model_type(&shot.model_type_id)
        .map(|m| m.prompt)
        .unwrap_or(FALLBACK_MODEL_PROMPT);
    let scenario = catalog::find_scenario_type(&shot.scenario_type_id)
        .map(|s| s.prompt)
        .unwrap_or(FALLBACK_SCENARIO_PROMPT);
    let pose = match shot.pose.trim() {
        "" => DEFAULT_POSE,
        custom => custom,
    };

    let mut prompt = format!(
        "Generate an **ultra high-resolution, professional, lifestyle photograph**. Aspect Ratio: **{ratio}**.\n\
         Feature {model} {scenario}.\n\
         The model is **{pose}**.\n\
         Render the product from the input images expertly into the scene.\n\
         **Content Writer**: {writer}\n\
         **Style**: {style}.\n\
         {NEGATIVE_CONSTRAINT}",
        ratio = size.ratio,
        writer = content_writer_clause(options, aesthetic.name),
        style = aesthetic.prompt,
    );
    if mode.is_face_swap() && assets.face_reference {
        push_clause(&mut prompt, Some(FACE_REFERENCE_CLAUSE.to_string()));
    }
    prompt
}

fn action_prompt(mode: &VisualMode) -> String {
    format!(
        "{} {ACTION_QUALIFIER} {NEGATIVE_CONSTRAINT}",
        mode.layout.unwrap_or_default()
    )
}

pub fn compose_prompt(
    mode: &VisualMode,
    size: &AdSize,
    options: &CreativeOptions,
    assets: AssetPresence,
) -> String {
    let prompt = match mode.kind {
        ModeKind::Combo => combo_prompt(mode, size, options, assets),
        ModeKind::Banner => banner_prompt(mode, size, options, assets),
        ModeKind::ModelShot => model_shot_prompt(mode, size, options, assets),
        ModeKind::Action => action_prompt(mode),
    };
    debug!("Composed {:?} prompt for mode {} ({} chars)", mode.kind, mode.id, prompt.len());
    prompt
}

fn resolve_mode_and_size(
    options: &CreativeOptions,
) -> Result<(&'static VisualMode, &'static AdSize), AdsmithError> {
    let mode = catalog::find_mode(&options.mode_id).ok_or_else(|| {
        AdsmithError::Validation(format!("Unknown visual mode: {}", options.mode_id))
    })?;
    let size = catalog::find_size(&options.size_id)
        .ok_or_else(|| AdsmithError::Validation(format!("Unknown ad size: {}", options.size_id)))?;
    Ok((mode, size))
}

/// Composes the prompt for a preview, without the pre-call image checks.
pub fn compose_from_options(
    options: &CreativeOptions,
    images: &ReferenceImages,
) -> Result<(String, &'static AdSize), AdsmithError> {
    let (mode, size) = resolve_mode_and_size(options)?;
    Ok((compose_prompt(mode, size, options, images.into()), size))
}

/// Checks the pre-call preconditions and materializes the synthesis payload.
pub fn build_generation_request(
    options: &CreativeOptions,
    images: &ReferenceImages,
) -> Result<GenerationRequest, AdsmithError> {
    let (mode, size) = resolve_mode_and_size(options)?;

    if images.products.is_empty() {
        return Err(AdsmithError::Validation(
            "Please upload at least one product image.".to_string(),
        ));
    }
    if images.products.len() > MAX_PRODUCT_IMAGES {
        return Err(AdsmithError::Validation(format!(
            "At most {MAX_PRODUCT_IMAGES} product images are supported, got {}",
            images.products.len()
        )));
    }
    if mode.is_face_swap() && images.face_reference.is_none() {
        return Err(AdsmithError::Validation(format!(
            "Please upload a face reference image for the '{}' mode.",
            mode.name
        )));
    }

    let prompt = compose_prompt(mode, size, options, images.into());

    let mut payload = images.products.clone();
    let brands_with_logo = matches!(mode.kind, ModeKind::Combo | ModeKind::Banner)
        && options.branding.include_logo;
    if let Some(logo) = images.logo.as_ref().filter(|_| brands_with_logo) {
        payload.push(logo.clone());
    }
    if let Some(face) = images.face_reference.as_ref().filter(|_| mode.is_face_swap()) {
        payload.push(face.clone());
    }

    Ok(GenerationRequest {
        prompt,
        images: payload,
        aspect_ratio: Some(size.ratio.to_string()),
    })
}
