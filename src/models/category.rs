use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::symbol::{Color, Icon};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            icon: Icon::Unknown,
            color: Color::Slate,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f, "Icon:  {}", self.icon)?;
        writeln!(f, "Color: {}", self.color)?;
        if let Some(image) = &self.image {
            writeln!(f, "Image: {}", image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let cat = Category::new("Hospitals");
        assert_eq!(cat.name, "Hospitals");
        assert!(cat.description.is_empty());
        assert_eq!(cat.icon, Icon::Unknown);
        assert_eq!(cat.color, Color::Slate);
        assert!(cat.image.is_none());
    }

    #[test]
    fn test_category_builder() {
        let cat = Category::new("Schools")
            .with_description("Schools and colleges around the thana")
            .with_icon(Icon::School)
            .with_color(Color::Purple);
        assert_eq!(cat.icon, Icon::School);
        assert_eq!(cat.color, Color::Purple);
        assert!(cat.description.contains("colleges"));
    }

    #[test]
    fn test_category_json_roundtrip() {
        let cat = Category::new("Transport")
            .with_icon(Icon::Bus)
            .with_color(Color::Orange);
        let json = serde_json::to_string(&cat).unwrap();
        let parsed: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(cat, parsed);
    }

    #[test]
    fn test_category_parses_with_missing_optional_fields() {
        // Entries written by other tooling may omit everything but id/name.
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","name":"Mosques"}"#;
        let parsed: Category = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "Mosques");
        assert_eq!(parsed.icon, Icon::Unknown);
    }

    #[test]
    fn test_category_display() {
        let cat = Category::new("Hospitals").with_icon(Icon::Hospital);
        let output = format!("{}", cat);
        assert!(output.contains("Hospitals"));
        assert!(output.contains("Icon:  hospital"));
    }
}
