//! Photo and video studio settings, plus the past generations gallery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    /// Image
    Photo,
    /// Video clip
    Video,
    /// Text
    Text,
}

impl GenerationKind {
    /// Get all kinds
    pub const fn all() -> &'static [Self] {
        &[Self::Photo, Self::Video, Self::Text]
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Photo => "Photo",
            Self::Video => "Video",
            Self::Text => "Text",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Photo => "🖼",
            Self::Video => "🎞",
            Self::Text => "📄",
        }
    }
}

/// A past generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Unique identifier
    pub id: String,
    /// Artifact kind
    pub kind: GenerationKind,
    /// Title
    pub title: String,
    /// When it was generated
    pub created_at: DateTime<Utc>,
    /// Text excerpt (text generations only)
    pub preview: Option<String>,
}

/// One adjustable studio setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioField {
    /// Generation model
    Model,
    /// Output size (photo)
    Resolution,
    /// Frame orientation
    Orientation,
    /// Clip length (video)
    Duration,
}

impl StudioField {
    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Resolution => "Resolution",
            Self::Orientation => "Orientation",
            Self::Duration => "Duration",
        }
    }
}

const PHOTO_MODELS: &[&str] = &["Midjourney", "DALL-E 3", "Stable Diffusion", "Kandinsky"];
const VIDEO_MODELS: &[&str] = &["Sora", "Runway Gen-2", "Pika Labs", "Stable Video"];
const RESOLUTIONS: &[&str] = &["512x512", "768x768", "1024x1024", "1024x1792", "1792x1024"];
const PHOTO_ORIENTATIONS: &[&str] = &["Square", "Portrait", "Landscape"];
const VIDEO_ORIENTATIONS: &[&str] = &["Horizontal", "Vertical", "Square"];
const DURATIONS: &[&str] = &["4 s", "8 s", "16 s"];

/// Form state of the photo or video studio page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudioSettings {
    /// Photo or video
    pub kind: GenerationKind,
    model: usize,
    resolution: usize,
    orientation: usize,
    duration: usize,
}

impl StudioSettings {
    /// Defaults: first model, 1024x1024, first orientation, shortest clip
    pub const fn new(kind: GenerationKind) -> Self {
        Self {
            kind,
            model: 0,
            resolution: 2,
            orientation: 0,
            duration: 0,
        }
    }

    /// Settings shown for this kind, in display order
    pub const fn fields(&self) -> &'static [StudioField] {
        match self.kind {
            GenerationKind::Video => &[StudioField::Model, StudioField::Orientation, StudioField::Duration],
            _ => &[StudioField::Model, StudioField::Resolution, StudioField::Orientation],
        }
    }

    /// Choices for a setting; empty when it does not apply to this kind
    pub const fn options(&self, field: StudioField) -> &'static [&'static str] {
        let video = matches!(self.kind, GenerationKind::Video);
        match field {
            StudioField::Model if video => VIDEO_MODELS,
            StudioField::Model => PHOTO_MODELS,
            StudioField::Resolution if video => &[],
            StudioField::Resolution => RESOLUTIONS,
            StudioField::Orientation if video => VIDEO_ORIENTATIONS,
            StudioField::Orientation => PHOTO_ORIENTATIONS,
            StudioField::Duration if video => DURATIONS,
            StudioField::Duration => &[],
        }
    }

    fn slot(&mut self, field: StudioField) -> &mut usize {
        match field {
            StudioField::Model => &mut self.model,
            StudioField::Resolution => &mut self.resolution,
            StudioField::Orientation => &mut self.orientation,
            StudioField::Duration => &mut self.duration,
        }
    }

    /// Current choice for a setting, if it applies to this kind
    pub fn value(&self, field: StudioField) -> Option<&'static str> {
        let idx = match field {
            StudioField::Model => self.model,
            StudioField::Resolution => self.resolution,
            StudioField::Orientation => self.orientation,
            StudioField::Duration => self.duration,
        };
        self.options(field).get(idx).copied()
    }

    /// Move a setting to its next choice, wrapping; returns the new value
    pub fn cycle(&mut self, field: StudioField) -> Option<&'static str> {
        let len = self.options(field).len();
        if len == 0 {
            return None;
        }
        let slot = self.slot(field);
        *slot = (*slot + 1) % len;
        self.value(field)
    }

    /// Check a prompt and pair it with the current settings
    pub fn request(&self, prompt: &str) -> Result<GenerationRequest> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::validation(format!(
                "describe the {} to generate",
                self.kind.label().to_lowercase()
            )));
        }
        Ok(GenerationRequest {
            kind: self.kind,
            prompt: prompt.to_string(),
            settings: self
                .fields()
                .iter()
                .filter_map(|field| self.value(*field).map(|value| (*field, value)))
                .collect(),
        })
    }
}

/// A validated generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Photo or video
    pub kind: GenerationKind,
    /// Trimmed description
    pub prompt: String,
    /// Chosen settings, in display order
    pub settings: Vec<(StudioField, &'static str)>,
}

impl GenerationRequest {
    /// Settings joined for display, e.g. "Midjourney · 1024x1024 · Square"
    pub fn summary(&self) -> String {
        self.settings
            .iter()
            .map(|(_, value)| *value)
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_and_video_fields_differ() {
        let photo = StudioSettings::new(GenerationKind::Photo);
        assert_eq!(photo.value(StudioField::Resolution), Some("1024x1024"));
        assert_eq!(photo.value(StudioField::Duration), None);

        let video = StudioSettings::new(GenerationKind::Video);
        assert_eq!(video.value(StudioField::Model), Some("Sora"));
        assert_eq!(video.value(StudioField::Resolution), None);
        assert_eq!(video.fields().len(), 3);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut video = StudioSettings::new(GenerationKind::Video);
        assert_eq!(video.cycle(StudioField::Duration), Some("8 s"));
        assert_eq!(video.cycle(StudioField::Duration), Some("16 s"));
        assert_eq!(video.cycle(StudioField::Duration), Some("4 s"));
        assert_eq!(video.cycle(StudioField::Resolution), None);
    }

    #[test]
    fn test_blank_prompt_is_rejected() {
        let photo = StudioSettings::new(GenerationKind::Photo);
        assert!(matches!(photo.request("   "), Err(Error::Validation(_))));

        let request = photo.request(" Sunset over the mountains ").unwrap();
        assert_eq!(request.prompt, "Sunset over the mountains");
        assert_eq!(request.summary(), "Midjourney · 1024x1024 · Square");
    }
}
