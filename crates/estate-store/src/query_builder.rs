//! Listing query builder.
//!
//! Compiles a canonical [`ListingFilter`] plus [`Pagination`] into a GROQ
//! listing query, its matching count query, and the parameters both refer to.
//!
//! # Guarantees
//!
//! 1. **Parameterized**: every filter value is bound as a typed `$param`.
//!    User text never becomes query syntax; the only literals spliced into
//!    the query text are constants and the integer window bounds. The
//!    location operand is bound as the filter holds it; `from_raw` has
//!    already removed `*` from it.
//!
//! 2. **Deterministic**: identical inputs produce byte-identical queries and
//!    parameter maps (parameters are kept in a `BTreeMap`).
//!
//! 3. **Fixed ordering**: results are always sorted by `publishedAt desc`.
//!
//! 4. **Shared predicate**: the count query uses exactly the listing query's
//!    predicate, without the window.

use std::collections::BTreeMap;

use estate_core::{defaults, BedsFilter, ListingFilter, Pagination};

/// Document fields referenced by the builder.
pub mod fields {
    pub const CITY: &str = "address.city";
    pub const REGION: &str = "address.region";
    pub const PROPERTY_TYPE: &str = "propertyType";
    pub const STATUS: &str = "status";
    pub const PRICE: &str = "price";
    pub const BEDROOMS: &str = "bedrooms";
    pub const PUBLISHED_AT: &str = "publishedAt";
}

/// Projection applied to every listing document.
pub const LISTING_PROJECTION: &str = r#"{ _id, title, "slug": slug.current, price, propertyType, status, bedrooms, bathrooms, area, address, "mainImage": mainImage.asset._ref, "agent": agent._ref, publishedAt }"#;

/// Type-safe parameter bound into a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// Exact text operand.
    Text(String),
    /// Substring operand for `match`; sent wrapped in `*` wildcards.
    Pattern(String),
    /// Numeric operand.
    Number(f64),
    /// Integer operand.
    Int(u32),
}

impl QueryParam {
    /// JSON value sent to the content store.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            QueryParam::Text(s) => serde_json::Value::from(s.as_str()),
            QueryParam::Pattern(s) => serde_json::Value::from(format!("*{}*", s)),
            QueryParam::Number(n) => serde_json::Value::from(*n),
            QueryParam::Int(n) => serde_json::Value::from(*n),
        }
    }
}

/// One conjunct of the listing predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `_type == "property"`
    DocumentType,
    /// Any of `fields` contains the pattern bound to `param`.
    Matches {
        fields: &'static [&'static str],
        param: &'static str,
    },
    /// `field == $param`
    Equals {
        field: &'static str,
        param: &'static str,
    },
    /// `field >= $param`
    AtLeast {
        field: &'static str,
        param: &'static str,
    },
    /// `field <= $param`
    AtMost {
        field: &'static str,
        param: &'static str,
    },
}

impl Predicate {
    /// Render as a GROQ boolean expression.
    pub fn render(&self) -> String {
        match self {
            Predicate::DocumentType => {
                format!("_type == \"{}\"", defaults::LISTING_DOCUMENT_TYPE)
            }
            Predicate::Matches { fields, param } => {
                let alternatives: Vec<String> = fields
                    .iter()
                    .map(|field| format!("{} match ${}", field, param))
                    .collect();
                format!("({})", alternatives.join(" || "))
            }
            Predicate::Equals { field, param } => format!("{} == ${}", field, param),
            Predicate::AtLeast { field, param } => format!("{} >= ${}", field, param),
            Predicate::AtMost { field, param } => format!("{} <= ${}", field, param),
        }
    }
}

/// Compiled listing + count query pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Conjuncts of the shared predicate, in render order.
    pub predicates: Vec<Predicate>,
    /// Bound parameters by name (without the `$`).
    pub params: BTreeMap<String, QueryParam>,
    /// Windowed, ordered, projected listing query.
    pub listing_query: String,
    /// Count of all documents matching the predicate.
    pub count_query: String,
    pub pagination: Pagination,
}

impl CompiledQuery {
    pub fn param(&self, name: &str) -> Option<&QueryParam> {
        self.params.get(name)
    }
}

/// Builds a [`CompiledQuery`] from a validated filter.
///
/// # Example
///
/// ```rust,ignore
/// use estate_core::{ListingFilter, Pagination};
/// use estate_store::ListingQueryBuilder;
///
/// let filter = ListingFilter {
///     location: Some("Kassandra".to_string()),
///     min_price: Some(100_000.0),
///     ..Default::default()
/// };
///
/// let query = ListingQueryBuilder::new(&filter, Pagination::new(2, 12)).build();
/// // query.count_query:
/// //   count(*[_type == "property" && (address.city match $location
/// //     || address.region match $location) && price >= $minPrice])
/// // query.listing_query ends with: | order(publishedAt desc) [12...24] { ... }
/// ```
pub struct ListingQueryBuilder<'a> {
    filter: &'a ListingFilter,
    pagination: Pagination,
}

impl<'a> ListingQueryBuilder<'a> {
    pub fn new(filter: &'a ListingFilter, pagination: Pagination) -> Self {
        Self { filter, pagination }
    }

    pub fn build(&self) -> CompiledQuery {
        let mut predicates = vec![Predicate::DocumentType];
        let mut params = BTreeMap::new();

        if let Some(ref location) = self.filter.location {
            predicates.push(Predicate::Matches {
                fields: &[fields::CITY, fields::REGION],
                param: "location",
            });
            params.insert(
                "location".to_string(),
                QueryParam::Pattern(location.clone()),
            );
        }

        if let Some(ref property_type) = self.filter.property_type {
            predicates.push(Predicate::Equals {
                field: fields::PROPERTY_TYPE,
                param: "propertyType",
            });
            params.insert(
                "propertyType".to_string(),
                QueryParam::Text(property_type.clone()),
            );
        }

        if let Some(status) = self.filter.status {
            predicates.push(Predicate::Equals {
                field: fields::STATUS,
                param: "status",
            });
            params.insert(
                "status".to_string(),
                QueryParam::Text(status.as_str().to_string()),
            );
        }

        if let Some(min) = self.filter.min_price {
            predicates.push(Predicate::AtLeast {
                field: fields::PRICE,
                param: "minPrice",
            });
            params.insert("minPrice".to_string(), QueryParam::Number(min));
        }

        if let Some(max) = self.filter.max_price {
            predicates.push(Predicate::AtMost {
                field: fields::PRICE,
                param: "maxPrice",
            });
            params.insert("maxPrice".to_string(), QueryParam::Number(max));
        }

        match self.filter.beds {
            Some(BedsFilter::Exactly(n)) => {
                predicates.push(Predicate::Equals {
                    field: fields::BEDROOMS,
                    param: "beds",
                });
                params.insert("beds".to_string(), QueryParam::Int(n));
            }
            Some(BedsFilter::AtLeastFive) => {
                predicates.push(Predicate::AtLeast {
                    field: fields::BEDROOMS,
                    param: "beds",
                });
                params.insert(
                    "beds".to_string(),
                    QueryParam::Int(defaults::BEDS_OR_MORE),
                );
            }
            None => {}
        }

        let expr = predicates
            .iter()
            .map(Predicate::render)
            .collect::<Vec<_>>()
            .join(" && ");

        let listing_query = format!(
            "*[{}] | order({} desc) [{}...{}] {}",
            expr,
            fields::PUBLISHED_AT,
            self.pagination.offset(),
            self.pagination.end(),
            LISTING_PROJECTION
        );
        let count_query = format!("count(*[{}])", expr);

        CompiledQuery {
            predicates,
            params,
            listing_query,
            count_query,
            pagination: self.pagination,
        }
    }
}
