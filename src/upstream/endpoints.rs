//! Upstream URL construction.
//!
//! # Responsibilities
//! - Resolve caller coordinates against the configured fallback
//! - Build the exact URL each upstream operation expects
//! - Keep the fixed query parameters the upstream web client sends
//!
//! # Design Decisions
//! - Coordinates are opaque strings; malformed values pass through
//! - Query values go through form encoding, never string concatenation
//! - The search metadata blob is sent verbatim, as the web client does

use url::Url;

use crate::config::FallbackLocation;

/// Fixed metadata blob the full-search endpoint expects alongside dish
/// queries. Sent URL-encoded as a single query value.
const SEARCH_METADATA: &str = r#"{"type":"DISH","data":{"vegIdentifier":"VEG","cloudinaryId":"athbxylw1pvnebsbosky","dishFamilyId":"846649","dishFamilyIds":["846649"]},"businessCategory":"SWIGGY_FOOD","displayLabel":"Dish"}"#;

/// Fixed query id the full-search endpoint expects.
const SEARCH_QUERY_UNIQUE_ID: &str = "9375ec94-48ff-c677-9afe-3e101dd72dec";

/// A latitude/longitude pair, already resolved against the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoPoint {
    pub lat: String,
    pub lng: String,
}

impl GeoPoint {
    /// Substitute the configured fallback for missing coordinates.
    /// Supplied values pass through unmodified, numeric or not.
    pub fn resolve(
        lat: Option<String>,
        lng: Option<String>,
        fallback: &FallbackLocation,
    ) -> Self {
        Self {
            lat: lat.unwrap_or_else(|| fallback.lat.clone()),
            lng: lng.unwrap_or_else(|| fallback.lng.clone()),
        }
    }
}

/// Builder for the upstream API URLs, rooted at the configured base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    /// The upstream origin, for the `Origin` header.
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    /// The upstream landing page, for the `Referer` header and the
    /// session handshake.
    pub fn landing_page(&self) -> String {
        format!("{}/", self.origin())
    }

    fn build(&self, path: &str, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Restaurant listing for a coordinate.
    pub fn restaurant_list(&self, geo: &GeoPoint) -> Url {
        self.build(
            "/dapi/restaurants/list/v5",
            &[
                ("lat", &geo.lat),
                ("lng", &geo.lng),
                ("is-seo-homepage-enabled", "true"),
                ("page_type", "DESKTOP_WEB_LISTING"),
            ],
        )
    }

    /// Complete menu for one restaurant.
    pub fn menu(&self, restaurant_id: &str, geo: &GeoPoint) -> Url {
        self.build(
            "/dapi/menu/pl",
            &[
                ("page-type", "REGULAR_MENU"),
                ("complete-menu", "true"),
                ("lat", &geo.lat),
                ("lng", &geo.lng),
                ("restaurantId", restaurant_id),
            ],
        )
    }

    /// Landing categories shown before a search.
    pub fn pre_search(&self, geo: &GeoPoint) -> Url {
        self.build(
            "/dapi/landing/PRE_SEARCH",
            &[("lat", &geo.lat), ("lng", &geo.lng)],
        )
    }

    /// Type-ahead search suggestions.
    pub fn search_suggest(&self, query: &str, geo: &GeoPoint) -> Url {
        self.build(
            "/dapi/restaurants/search/suggest",
            &[
                ("lat", &geo.lat),
                ("lng", &geo.lng),
                ("str", query),
                ("trackingId", "undefined"),
                ("includeIMItem", "true"),
            ],
        )
    }

    /// Full search results.
    pub fn search_results(&self, query: &str, geo: &GeoPoint) -> Url {
        self.build(
            "/dapi/restaurants/search/v3",
            &[
                ("lat", &geo.lat),
                ("lng", &geo.lng),
                ("str", query),
                ("trackingId", "null"),
                ("submitAction", "SUGGESTION"),
                ("queryUniqueId", SEARCH_QUERY_UNIQUE_ID),
                ("metaData", SEARCH_METADATA),
            ],
        )
    }
}
