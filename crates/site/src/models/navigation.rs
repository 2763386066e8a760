//! Navigation item types.
//!
//! Navigation links are managed from the admin panel; the public site reads
//! them in position order and hides inactive entries. When the store is
//! unreachable the built-in defaults below are served instead, so the site
//! header never renders empty.

use serde::{Deserialize, Serialize};

/// A labeled link shown in site navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    /// Stable slug identifier (e.g. `"donate"`).
    pub id: String,
    /// Text shown in the navigation bar.
    pub label: String,
    /// Link target, absolute path or fragment.
    pub href: String,
    /// Sort position, ascending.
    #[serde(rename = "order")]
    pub position: i32,
    /// Hidden from the public site when false.
    pub is_active: bool,
}

impl NavigationItem {
    /// The built-in navigation set, also used as the read-path fallback when
    /// the store cannot be reached.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        [
            ("home", "Home", "/", 1),
            ("donate", "Donate", "/donations", 2),
            ("ecommerce", "E-commerce", "/ecommerce", 3),
            ("blog", "Blog", "/blog", 4),
            ("about", "About Us", "#about", 5),
            ("contact", "Contact", "#contact", 6),
        ]
        .into_iter()
        .map(|(id, label, href, position)| Self {
            id: id.to_owned(),
            label: label.to_owned(),
            href: href.to_owned(),
            position,
            is_active: true,
        })
        .collect()
    }

    /// Whether the item has the fields required to be stored.
    #[must_use]
    pub fn is_storable(&self) -> bool {
        !self.id.is_empty() && !self.label.is_empty() && !self.href.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_six_active_items_in_order() {
        let items = NavigationItem::defaults();
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|i| i.is_active));

        let positions: Vec<i32> = items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);

        assert_eq!(items.first().unwrap().id, "home");
        assert_eq!(items.last().unwrap().href, "#contact");
    }

    #[test]
    fn test_defaults_are_storable() {
        assert!(NavigationItem::defaults().iter().all(NavigationItem::is_storable));
    }

    #[test]
    fn test_serde_wire_shape() {
        let item = NavigationItem {
            id: "donate".to_owned(),
            label: "Donate".to_owned(),
            href: "/donations".to_owned(),
            position: 2,
            is_active: true,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["order"], 2);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["href"], "/donations");
    }
}
