//! Filter validation and pagination as seen from request input.

use estate_core::{BedsFilter, Error, ListingFilter, ListingStatus, Pagination, RawSearchParams};

fn raw() -> RawSearchParams {
    RawSearchParams::default()
}

#[test]
fn test_full_filter_is_canonicalized() {
    let params = RawSearchParams {
        location: Some("  Kassandra ".into()),
        property_type: Some("villa".into()),
        status: Some("FOR-SALE".into()),
        min_price: Some("100000".into()),
        max_price: Some("300000.50".into()),
        beds: Some("5+".into()),
        ..raw()
    };
    let filter = ListingFilter::from_raw(&params).unwrap();

    assert_eq!(filter.location.as_deref(), Some("Kassandra"));
    assert_eq!(filter.status, Some(ListingStatus::ForSale));
    assert_eq!(filter.max_price, Some(300_000.5));
    assert_eq!(filter.beds, Some(BedsFilter::AtLeastFive));
    assert_eq!(filter.active_count(), 6);
}

#[test]
fn test_equal_bounds_are_accepted() {
    let params = RawSearchParams {
        min_price: Some("250000".into()),
        max_price: Some("250000".into()),
        ..raw()
    };
    assert!(ListingFilter::from_raw(&params).is_ok());
}

#[test]
fn test_rejections_are_validation_errors() {
    let bad = [
        RawSearchParams { min_price: Some("cheap".into()), ..raw() },
        RawSearchParams { max_price: Some("-1".into()), ..raw() },
        RawSearchParams { max_price: Some("inf".into()), ..raw() },
        RawSearchParams { status: Some("leased".into()), ..raw() },
        RawSearchParams { beds: Some("many".into()), ..raw() },
        RawSearchParams {
            min_price: Some("300000".into()),
            max_price: Some("100000".into()),
            ..raw()
        },
    ];
    for params in bad {
        match ListingFilter::from_raw(&params) {
            Err(Error::Validation(_)) => {}
            other => panic!("expected validation error for {:?}, got {:?}", params, other),
        }
    }
}

#[test]
fn test_blank_fields_are_absent() {
    let params = RawSearchParams {
        location: Some("   ".into()),
        status: Some("".into()),
        ..raw()
    };
    let filter = ListingFilter::from_raw(&params).unwrap();
    assert!(filter.is_empty());
}

#[test]
fn test_pagination_clamps_and_falls_back() {
    assert_eq!(Pagination::from_raw(None, None), Pagination::new(1, 12));
    assert_eq!(Pagination::from_raw(Some("-3"), Some("0")), Pagination::new(1, 1));
    assert_eq!(Pagination::from_raw(Some("2"), Some("500")), Pagination::new(2, 100));
    assert_eq!(Pagination::from_raw(Some("abc"), Some("1.5")), Pagination::default());
}
