use std::fmt;

/// One generation request as built by the UI collaborator.
///
/// Immutable once built; the credential is passed through to the provider
/// verbatim and never inspected here.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub credential: String,
    pub operation: Operation,
    /// When true the provider materializes every image before answering.
    pub synchronous: bool,
    pub requested_count: u32,
}

impl GenerationRequest {
    /// Builds a request. `requested_count` is clamped to at least 1.
    pub fn new(
        credential: impl Into<String>,
        operation: Operation,
        synchronous: bool,
        requested_count: u32,
    ) -> Self {
        Self {
            credential: credential.into(),
            operation,
            synchronous,
            requested_count: requested_count.max(1),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    /// The user-facing prompt of the operation, when it carries one.
    pub fn prompt(&self) -> Option<&str> {
        match &self.operation {
            Operation::Generate(p) => Some(&p.prompt),
            Operation::LifestyleByText(p) => Some(&p.scene_description),
            Operation::GenerativeFill(p) => Some(&p.prompt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Generate(GeneratePayload),
    Packshot(PackshotPayload),
    Shadow(ShadowPayload),
    LifestyleByText(LifestyleTextPayload),
    LifestyleByImage(LifestyleImagePayload),
    GenerativeFill(GenerativeFillPayload),
    Erase(ErasePayload),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Generate(_) => OperationKind::Generate,
            Operation::Packshot(_) => OperationKind::Packshot,
            Operation::Shadow(_) => OperationKind::Shadow,
            Operation::LifestyleByText(_) => OperationKind::LifestyleByText,
            Operation::LifestyleByImage(_) => OperationKind::LifestyleByImage,
            Operation::GenerativeFill(_) => OperationKind::GenerativeFill,
            Operation::Erase(_) => OperationKind::Erase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Generate,
    Packshot,
    Shadow,
    LifestyleByText,
    LifestyleByImage,
    GenerativeFill,
    Erase,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Generate => "generate",
            OperationKind::Packshot => "packshot",
            OperationKind::Shadow => "shadow",
            OperationKind::LifestyleByText => "lifestyle_shot_by_text",
            OperationKind::LifestyleByImage => "lifestyle_shot_by_image",
            OperationKind::GenerativeFill => "generative_fill",
            OperationKind::Erase => "erase",
        };
        f.write_str(name)
    }
}

/// Text-to-image generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePayload {
    pub prompt: String,
    pub aspect_ratio: String,
    pub enhance_image: bool,
    /// "photography" or "art"; `None` lets the provider pick.
    pub medium: Option<String>,
    pub prompt_enhancement: bool,
    pub content_moderation: bool,
}

impl Default for GeneratePayload {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            aspect_ratio: "1:1".to_string(),
            enhance_image: true,
            medium: None,
            prompt_enhancement: false,
            content_moderation: true,
        }
    }
}

/// Clean product packshot on a solid background.
#[derive(Debug, Clone, PartialEq)]
pub struct PackshotPayload {
    pub image: Vec<u8>,
    pub background_color: String,
    pub sku: Option<String>,
    pub force_rmbg: bool,
    pub content_moderation: bool,
}

/// Product shadow compositing.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPayload {
    pub image: Vec<u8>,
    pub style: ShadowStyle,
    /// `None` requests a transparent background.
    pub background_color: Option<String>,
    pub shadow_color: String,
    pub offset: [i32; 2],
    /// 0..=100.
    pub intensity: u32,
    pub blur: u32,
    pub sku: Option<String>,
    pub force_rmbg: bool,
    pub content_moderation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowStyle {
    Natural,
    Drop,
}

impl ShadowStyle {
    /// Lowercase wire name, as the provider expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShadowStyle::Natural => "natural",
            ShadowStyle::Drop => "drop",
        }
    }
}

/// Lifestyle scene described by text.
#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleTextPayload {
    pub image: Vec<u8>,
    pub scene_description: String,
    pub placement: Placement,
    pub fast: bool,
    pub optimize_description: bool,
    /// Ignored by the provider in fast mode.
    pub exclude_elements: Option<String>,
    pub original_quality: bool,
}

/// Lifestyle scene taken from a reference image.
#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleImagePayload {
    pub image: Vec<u8>,
    pub reference_image: Vec<u8>,
    pub placement: Placement,
    pub enhance_ref_image: bool,
    /// 0.0..=1.0.
    pub ref_image_influence: f32,
    pub original_quality: bool,
}

/// Where the product lands inside the generated scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Keep the product exactly where it is in the source image.
    Original,
    Automatic {
        shot_size: [u32; 2],
    },
    Manual {
        /// Lowercase position names, e.g. "upper_left".
        positions: Vec<String>,
        shot_size: [u32; 2],
    },
    Padding {
        /// Left, right, top, bottom.
        padding: [u32; 4],
    },
    Coordinates {
        foreground_size: [u32; 2],
        foreground_location: [i32; 2],
        shot_size: [u32; 2],
    },
}

/// Masked in-painting driven by a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerativeFillPayload {
    pub image: Vec<u8>,
    pub mask: Vec<u8>,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub seed: Option<u32>,
    pub content_moderation: bool,
}

/// Foreground removal behind a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct ErasePayload {
    pub image: Vec<u8>,
    pub mask: Vec<u8>,
    pub content_moderation: bool,
}
