use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single directory entry: a hospital, school, bus route, shop and so on.
///
/// `category_id` is a soft reference. The category it points at may have been
/// deleted; such items are kept and shown as uncategorized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfoItem {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub established: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl InfoItem {
    pub fn new(title: impl Into<String>, category_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id,
            title: title.into(),
            address: String::new(),
            phone: None,
            item_type: None,
            established: None,
            specialty: None,
            timing: None,
            route: None,
            details: None,
            map_link: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn with_timing(mut self, timing: impl Into<String>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_map_link(mut self, map_link: impl Into<String>) -> Self {
        self.map_link = Some(map_link.into());
        self
    }
}

impl fmt::Display for InfoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        if let Some(item_type) = &self.item_type {
            writeln!(f, "Type:        {}", item_type)?;
        }
        if !self.address.is_empty() {
            writeln!(f, "Address:     {}", self.address)?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "Phone:       {}", phone)?;
        }
        if let Some(established) = &self.established {
            writeln!(f, "Established: {}", established)?;
        }
        if let Some(specialty) = &self.specialty {
            writeln!(f, "Specialty:   {}", specialty)?;
        }
        if let Some(timing) = &self.timing {
            writeln!(f, "Timing:      {}", timing)?;
        }
        if let Some(route) = &self.route {
            writeln!(f, "Route:       {}", route)?;
        }
        if let Some(map_link) = &self.map_link {
            writeln!(f, "Map:         {}", map_link)?;
        }
        if let Some(details) = &self.details {
            writeln!(f, "\n{}", details)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new() {
        let cat_id = Uuid::new_v4();
        let item = InfoItem::new("Aminpur Health Complex", cat_id);
        assert_eq!(item.title, "Aminpur Health Complex");
        assert_eq!(item.category_id, cat_id);
        assert!(item.address.is_empty());
        assert!(item.phone.is_none());
    }

    #[test]
    fn test_item_builder() {
        let item = InfoItem::new("Kazirhat Bus Stand", Uuid::new_v4())
            .with_address("Kazirhat, Aminpur")
            .with_phone("01700-000001")
            .with_timing("6:00-22:00")
            .with_route("Kazirhat - Pabna Sadar");
        assert_eq!(item.address, "Kazirhat, Aminpur");
        assert_eq!(item.phone.as_deref(), Some("01700-000001"));
        assert_eq!(item.route.as_deref(), Some("Kazirhat - Pabna Sadar"));
    }

    #[test]
    fn test_item_json_roundtrip() {
        let item = InfoItem::new("Aminpur Pilot High School", Uuid::new_v4())
            .with_address("Aminpur Bazar")
            .with_item_type("High School")
            .with_details("Established secondary school near the bazar.");
        let json = serde_json::to_string(&item).unwrap();
        let parsed: InfoItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }

    #[test]
    fn test_item_display() {
        let item = InfoItem::new("Upazila Health Complex", Uuid::new_v4())
            .with_address("Bera Road")
            .with_phone("01700-000002");
        let output = format!("{}", item);
        assert!(output.contains("Upazila Health Complex"));
        assert!(output.contains("Address:     Bera Road"));
        assert!(output.contains("Phone:       01700-000002"));
    }
}
