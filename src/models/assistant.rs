//! AI assistant personas

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::Record;

/// Icons offered when creating an assistant
pub const ASSISTANT_ICONS: &[&str] = &["🤖", "✍️", "💻", "📊", "🎨", "🔍", "⚖️", "🎯", "💡", "🚀"];

/// Accent colours offered when creating an assistant
pub const ASSISTANT_COLORS: &[&str] = &[
    "#3B82F6", "#10B981", "#8B5CF6", "#F59E0B", "#EF4444", "#6366F1", "#EC4899", "#14B8A6",
];

/// A user-defined assistant persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// What the assistant is good at
    pub description: String,
    /// Emoji icon
    pub icon: String,
    /// Accent colour (hex)
    pub color: String,
}

impl Assistant {
    /// Create an assistant from the form; the name is required
    pub fn new(name: &str, description: &str, icon: &str, color: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }

        let icon = if icon.trim().is_empty() { ASSISTANT_ICONS[0] } else { icon.trim() };
        let color = if is_hex_color(color) { color } else { ASSISTANT_COLORS[0] };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        })
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Record for Assistant {
    const ENTITY: &'static str = "assistant";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let err = Assistant::new("   ", "desc", "🤖", "#3B82F6").unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_defaults_for_bad_icon_and_color() {
        let assistant = Assistant::new("Copywriter", "", "", "blue").unwrap();
        assert_eq!(assistant.icon, "🤖");
        assert_eq!(assistant.color, "#3B82F6");
    }
}
