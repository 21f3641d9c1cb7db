//! Listing fixtures shared by unit and integration tests across the workspace.

use chrono::{DateTime, Utc};

use estate_core::{Address, Listing, ListingStatus};

/// Minimal listing with the given id and publication time (RFC 3339).
///
/// Panics on a malformed timestamp; intended for tests only.
pub fn listing(id: &str, published_at: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        slug: Some(id.to_string()),
        price: 100_000.0,
        property_type: Some("apartment".to_string()),
        status: Some(ListingStatus::ForSale),
        bedrooms: Some(2),
        bathrooms: Some(1),
        area: Some(80.0),
        address: Address::default(),
        main_image: None,
        agent: None,
        published_at: published_at
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|e| panic!("bad fixture timestamp {}: {}", published_at, e)),
    }
}

/// Three-bedroom villa for sale in Kassandra, Halkidiki, at 250,000 EUR.
pub fn kassandra_villa() -> Listing {
    Listing {
        title: "Sea view villa in Kassandra".to_string(),
        slug: Some("sea-view-villa-kassandra".to_string()),
        price: 250_000.0,
        property_type: Some("villa".to_string()),
        bedrooms: Some(3),
        bathrooms: Some(2),
        area: Some(140.0),
        address: Address {
            street: None,
            city: Some("Kassandra".to_string()),
            region: Some("Halkidiki".to_string()),
            country: Some("Greece".to_string()),
        },
        ..listing("prop-kassandra-1", "2024-05-01T10:00:00Z")
    }
}

/// Apartment for sale in Thessaloniki at 180,000 EUR.
pub fn thessaloniki_flat() -> Listing {
    Listing {
        title: "City apartment".to_string(),
        slug: Some("city-apartment-thessaloniki".to_string()),
        price: 180_000.0,
        address: Address {
            street: Some("Tsimiski 12".to_string()),
            city: Some("Thessaloniki".to_string()),
            region: Some("Central Macedonia".to_string()),
            country: Some("Greece".to_string()),
        },
        ..listing("prop-thessaloniki-1", "2024-06-01T10:00:00Z")
    }
}
