// src/catalog.rs
//! Static option tables. Every entry is pure data: the prompt fragments can
//! be revised here without touching the composer.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    Combo,
    Banner,
    ModelShot,
    Action,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdSize {
    pub id: &'static str,
    pub name: &'static str,
    pub ratio: &'static str,
    pub pixel_hint: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CtaStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AestheticStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelType {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioType {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualMode {
    pub id: &'static str,
    pub group: &'static str,
    pub name: &'static str,
    pub kind: ModeKind,
    pub layout: Option<&'static str>,
}

pub const FACE_SWAP_MODE_ID: &str = "model-face-swap";

pub const DEFAULT_MODE_ID: &str = "traditional";
pub const DEFAULT_SIZE_ID: &str = "square";
pub const DEFAULT_AESTHETIC_ID: &str = "auto";
pub const DEFAULT_CTA_STYLE_ID: &str = "red-rounded";
pub const DEFAULT_CTA_TEXT: &str = "SHOP NOW";
pub const DEFAULT_MODEL_TYPE_ID: &str = "bangladeshi-f";
pub const DEFAULT_SCENARIO_TYPE_ID: &str = "cozy-home";
pub const DEFAULT_WATERMARK_TEXT: &str = "Rubel.shop";

pub static AD_SIZES: &[AdSize] = &[
    AdSize {
        id: "square",
        name: "Square (1:1)",
        ratio: "1:1",
        pixel_hint: "1080x1080",
        description: "Instagram/Facebook Feed",
    },
    AdSize {
        id: "vertical",
        name: "Vertical (3:4)",
        ratio: "3:4",
        pixel_hint: "1080x1350",
        description: "Optimal Feed Post",
    },
    AdSize {
        id: "story",
        name: "Story/Reel (9:16)",
        ratio: "9:16",
        pixel_hint: "1080x1920",
        description: "Full Screen Mobile",
    },
];

pub static CTA_STYLES: &[CtaStyle] = &[
    CtaStyle {
        id: "red-rounded",
        name: "Red Rounded",
        prompt: "a prominent, softly rounded, vibrant RED button",
    },
    CtaStyle {
        id: "blue-sharp",
        name: "Blue Sharp",
        prompt: "a sharp, rectangular, electric CYAN-BLUE button with slight metallic texture",
    },
    CtaStyle {
        id: "white-ghost",
        name: "White Ghost",
        prompt: "a clean, translucent WHITE button with a thin border, placed over the image",
    },
    CtaStyle {
        id: "gold-luxury",
        name: "Gold Luxury",
        prompt: "a luxurious, glossy GOLD gradient button with subtle depth and shadow",
    },
    CtaStyle {
        id: "playful-pop",
        name: "Playful Pop",
        prompt: "a bubbly, 3D-style button in bright orange or yellow, perfect for kids products",
    },
];

pub static AESTHETIC_STYLES: &[AestheticStyle] = &[
    AestheticStyle {
        id: "auto",
        name: "✨ Auto (AI Choice)",
        prompt: "an aesthetic style that perfectly matches the product identity and target audience",
    },
    AestheticStyle {
        id: "minimalist",
        name: "Minimalist & Clean",
        prompt: "a clean, white-space dominant, modern minimalist aesthetic with soft shadows",
    },
    AestheticStyle {
        id: "luxury",
        name: "Dark Luxury",
        prompt: "a premium, high-end aesthetic with dark tones, gold accents, and dramatic lighting",
    },
    AestheticStyle {
        id: "vibrant",
        name: "Vibrant Pop",
        prompt: "an energetic, colorful, high-saturation \"Pop Art\" style aesthetic",
    },
    AestheticStyle {
        id: "organic",
        name: "Nature & Organic",
        prompt: "a fresh, natural aesthetic with botanical elements, wood textures, and soft sunlight",
    },
    AestheticStyle {
        id: "tech",
        name: "Future Tech",
        prompt: "a sleek, neon-lit, cyberpunk or high-tech aesthetic with glowing elements",
    },
    AestheticStyle {
        id: "vintage",
        name: "Retro / Vintage",
        prompt: "a nostalgic, warm, retro aesthetic with film grain and muted classic tones",
    },
    AestheticStyle {
        id: "thumbnail",
        name: "Thumbnail",
        prompt: "a professional, high-click-through-rate YouTube thumbnail aesthetic with high contrast, vibrant colors, emotive elements, and a composition designed to hook the viewer instantly",
    },
];

pub static MODEL_TYPES: &[ModelType] = &[
    ModelType {
        id: "bangladeshi-f",
        name: "Female (Bangladeshi)",
        prompt: "a beautiful Bangladeshi woman",
    },
    ModelType {
        id: "bangladeshi-m",
        name: "Male (Bangladeshi)",
        prompt: "a handsome Bangladeshi man",
    },
    ModelType {
        id: "bangladeshi-kid",
        name: "Kid/Baby (Bangladeshi)",
        prompt: "a cute, happy Bangladeshi child",
    },
];

pub static SCENARIO_TYPES: &[ScenarioType] = &[
    ScenarioType {
        id: "cozy-home",
        name: "Cozy Home",
        prompt: "in a brightly lit, modern minimalist living room",
    },
    ScenarioType {
        id: "outdoor-adventure",
        name: "Outdoor Adventure",
        prompt: "on a misty mountain trail at sunrise",
    },
    ScenarioType {
        id: "office-desk",
        name: "Professional Desk",
        prompt: "at a clean, ergonomic home office desk",
    },
    ScenarioType {
        id: "gym",
        name: "Modern Gym",
        prompt: "in a clean, well-equipped modern gym during a workout",
    },
    ScenarioType {
        id: "cafe",
        name: "Urban Cafe",
        prompt: "in a trendy, sunlit European-style cafe",
    },
    ScenarioType {
        id: "playground",
        name: "Sunny Playground",
        prompt: "playing happily in a colorful, sunny outdoor playground with soft bokeh",
    },
    ScenarioType {
        id: "school-playroom",
        name: "School/Playroom",
        prompt: "in a bright, colorful preschool classroom or playroom filled with educational vibes",
    },
];

pub static VISUAL_MODES: &[VisualMode] = &[
    VisualMode {
        id: "super-bundle",
        group: "Combo & Packages",
        name: "Mega Combo Deal",
        kind: ModeKind::Combo,
        layout: Some(
            "A **professional, high-value \"Combo Offer\" composition**. All uploaded images represent **DISTINCT items** included in this package. Arrange them together artfully (e.g., grouped together in a dynamic pile or structured arrangement) to show abundance and value. Use commercial product lighting (softbox/rim light) to separate items from the background.",
        ),
    },
    VisualMode {
        id: "variety-collection",
        group: "Combo & Packages",
        name: "Collection Showcase",
        kind: ModeKind::Combo,
        layout: Some(
            "A **clean, organized \"Knolling\" or Grid-based composition**. Arrange the uploaded items in a neat, symmetrical pattern or a tidy flat-lay. This layout is perfect for showcasing variety, different colors, or a full product lineup. Ensure equal visual weight for each item.",
        ),
    },
    VisualMode {
        id: "traditional",
        group: "Banner Design",
        name: "Traditional / Classic",
        kind: ModeKind::Banner,
        layout: Some(
            "A **classic, trustworthy, and balanced advertisement design**. Use a standard rule-of-thirds composition with warm, welcoming lighting. The aesthetic is \"Family Brand\" or \"Trusted Heritage\". Avoid experimental angles—focus on a clear, honest, and high-quality presentation that feels safe and reliable.",
        ),
    },
    VisualMode {
        id: "editorial",
        group: "Banner Design",
        name: "Editorial / Magazine",
        kind: ModeKind::Banner,
        layout: Some(
            "An **ultra-chic, high-fashion \"Magazine Editorial\" composition**. Treat the product like a celebrity model. Use dramatic but soft lighting, interesting textures in the background (like marble, silk, or concrete), and a layout that mimics a spread in a premium fashion or tech magazine. High contrast, rich tones, and sophisticated negative space.",
        ),
    },
    VisualMode {
        id: "toy-specialist",
        group: "Banner Design",
        name: "Toy Specialist",
        kind: ModeKind::Banner,
        layout: Some(
            "An **enchanting, vibrant, and high-energy** banner. Use a **colorful, fun-filled background** with elements like soft clouds, stars, or abstract playful shapes.",
        ),
    },
    VisualMode {
        id: "elite-studio",
        group: "Banner Design",
        name: "Elite Studio Photo",
        kind: ModeKind::Banner,
        layout: Some(
            "An **ultra high-resolution, hyper-photorealistic, high-end studio photography** shot. The background is a luxurious, seamless gradient. Emphasize crisp focus and rich material rendering.",
        ),
    },
    VisualMode {
        id: "dynamic-angles",
        group: "Banner Design",
        name: "Dynamic Angles",
        kind: ModeKind::Banner,
        layout: Some(
            "An **ultra high-resolution, dynamic composition** using **unconventional camera angles**. Showcased with dramatic flair, bold lighting and deep shadows.",
        ),
    },
    VisualMode {
        id: "gen-z",
        group: "Banner Design",
        name: "Gen-Z Aesthetic",
        kind: ModeKind::Banner,
        layout: Some(
            "An **ultra high-resolution, vibrant, trendy, and playful creative** with a **Gen-Z aesthetic**. Use bright, contrasting colors and holographic textures.",
        ),
    },
    VisualMode {
        id: "cinematic",
        group: "Banner Design",
        name: "Cinematic Depth",
        kind: ModeKind::Banner,
        layout: Some(
            "An **ultra high-resolution, professional, cinematic** creative using deep midnight blues and subtle gold accents. Use **dramatic spotlighting**.",
        ),
    },
    VisualMode {
        id: "social-hook",
        group: "Banner Design",
        name: "Social Hook",
        kind: ModeKind::Banner,
        layout: Some(
            "An **attention-grabbing social media hook**. Bold, visually chaotic (in a compelling way), using highly contrasting colors to disrupt the feed.",
        ),
    },
    VisualMode {
        id: "model-ai-gen",
        group: "Model Photoshoot",
        name: "AI Model Generator",
        kind: ModeKind::ModelShot,
        layout: None,
    },
    VisualMode {
        id: FACE_SWAP_MODE_ID,
        group: "Model Photoshoot",
        name: "Model (Face Reference)",
        kind: ModeKind::ModelShot,
        layout: None,
    },
    VisualMode {
        id: "remove-bg",
        group: "Image Cleanup",
        name: "Remove Background",
        kind: ModeKind::Action,
        layout: Some("Isolate the main product with sharp precision on a pure white background."),
    },
];

impl VisualMode {
    pub fn is_face_swap(&self) -> bool {
        self.id == FACE_SWAP_MODE_ID
    }
}

pub fn find_mode(id: &str) -> Option<&'static VisualMode> {
    VISUAL_MODES.iter().find(|m| m.id == id)
}

pub fn find_size(id: &str) -> Option<&'static AdSize> {
    AD_SIZES.iter().find(|s| s.id == id)
}

pub fn find_aesthetic(id: &str) -> Option<&'static AestheticStyle> {
    AESTHETIC_STYLES.iter().find(|s| s.id == id)
}

pub fn find_cta_style(id: &str) -> Option<&'static CtaStyle> {
    CTA_STYLES.iter().find(|c| c.id == id)
}

pub fn find_model_type(id: &str) -> Option<&'static ModelType> {
    MODEL_TYPES.iter().find(|m| m.id == id)
}

pub fn find_scenario_type(id: &str) -> Option<&'static ScenarioType> {
    SCENARIO_TYPES.iter().find(|s| s.id == id)
}

/// Display groups in catalog order, each listed once.
pub fn mode_groups() -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = Vec::new();
    for mode in VISUAL_MODES {
        if !groups.contains(&mode.group) {
            groups.push(mode.group);
        }
    }
    groups
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub sizes: &'static [AdSize],
    pub cta_styles: &'static [CtaStyle],
    pub aesthetics: &'static [AestheticStyle],
    pub model_types: &'static [ModelType],
    pub scenario_types: &'static [ScenarioType],
    pub modes: &'static [VisualMode],
    pub groups: Vec<&'static str>,
}

pub fn catalog() -> Catalog {
    Catalog {
        sizes: AD_SIZES,
        cta_styles: CTA_STYLES,
        aesthetics: AESTHETIC_STYLES,
        model_types: MODEL_TYPES,
        scenario_types: SCENARIO_TYPES,
        modes: VISUAL_MODES,
        groups: mode_groups(),
    }
}
