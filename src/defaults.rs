//! Built-in starter dataset, the last tier of the load fallback chain.

use crate::models::{Category, Color, Icon, InfoItem};

/// Produces the default categories and entries for the Aminpur Thana area.
/// Fresh ids are generated on every call; the dataset is only used to seed
/// an otherwise empty store.
pub fn default_dataset() -> (Vec<Category>, Vec<InfoItem>) {
    let hospitals = Category::new("Hospitals & Clinics")
        .with_description("Health complexes, clinics and diagnostic centers")
        .with_icon(Icon::Hospital)
        .with_color(Color::Green);
    let education = Category::new("Education")
        .with_description("Schools, colleges and madrasas")
        .with_icon(Icon::School)
        .with_color(Color::Purple);
    let transport = Category::new("Transport")
        .with_description("Bus stands, launch ghats and routes")
        .with_icon(Icon::Bus)
        .with_color(Color::Orange);
    let emergency = Category::new("Emergency Services")
        .with_description("Police, fire service and ambulance contacts")
        .with_icon(Icon::Phone)
        .with_color(Color::Red);

    let items = vec![
        InfoItem::new("Aminpur Health Complex", hospitals.id)
            .with_address("Aminpur Bazar, Pabna")
            .with_phone("01700-000001")
            .with_item_type("Health Complex")
            .with_timing("24 hours"),
        InfoItem::new("Aminpur Pilot High School", education.id)
            .with_address("Aminpur Bazar Road")
            .with_item_type("High School")
            .with_details("Secondary school serving the bazar area."),
        InfoItem::new("Kazirhat Launch Ghat", transport.id)
            .with_address("Kazirhat, Aminpur")
            .with_route("Kazirhat - Aricha")
            .with_timing("6:00-20:00"),
        InfoItem::new("Aminpur Thana Police Station", emergency.id)
            .with_address("Thana Road, Aminpur")
            .with_phone("01700-000004")
            .with_item_type("Police"),
    ];

    (vec![hospitals, education, transport, emergency], items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset_is_consistent() {
        let (categories, items) = default_dataset();
        assert!(!categories.is_empty());
        assert!(!items.is_empty());

        // Every default item points at a default category.
        for item in &items {
            assert!(
                categories.iter().any(|c| c.id == item.category_id),
                "item '{}' references a missing category",
                item.title
            );
        }
    }

    #[test]
    fn test_default_categories_have_symbols() {
        let (categories, _) = default_dataset();
        for cat in &categories {
            assert_ne!(cat.icon, Icon::Unknown, "{} has no icon", cat.name);
        }
    }
}
