use serde::{Deserialize, Serialize};

use crate::money::{extract_display_magnitude, format_minor_units};

/// Product price as shipped by the catalog API
///
/// Every price carries two representations: the structural minor-unit
/// amount and a pre-rendered display string. Transformations that rewrite
/// the amount regenerate the display string so the two never drift apart.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Price {
    /// Amount in the currency's smallest unit (cents). Signed so that
    /// out-of-range discount parameters degrade to out-of-range amounts
    /// instead of panicking.
    #[serde(default)]
    pub price_in_cents: i64,
    /// Currency symbol appended to display strings (e.g. "€").
    #[serde(default)]
    pub currency: String,
    /// Human-formatted price string (e.g. "10.00€").
    #[serde(rename = "price", default)]
    pub formatted: String,
}

/// Seller metadata attached to a product
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Seller {
    /// Country code of the seller.
    #[serde(default)]
    pub country: String,
}

/// Product record from the catalog API
///
/// Every field is defaulted: a record missing fields deserializes to
/// empty/zero values rather than failing the whole response. Renderers
/// treat empty strings and empty lists as absent.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Product {
    /// Unique, stable identifier. Backends disagree on whether ids are
    /// JSON strings or numbers; both are accepted and normalized.
    #[serde(deserialize_with = "id_string_or_number", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub seller: Seller,
    /// Country codes the product ships to.
    #[serde(default)]
    pub shippable_countries: Vec<String>,
    /// Deposit timestamp, when the backend provides one.
    #[serde(default)]
    pub deposited_on: Option<String>,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: String,
}

fn id_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Source of the price magnitude used by the range filter
///
/// `Structural` reads the minor-unit amount every record already carries.
/// `DisplayString` re-parses the human-formatted price string the way the
/// storefront used to; kept as a compatibility shim only (see
/// [`extract_display_magnitude`] for its failure mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceMagnitude {
    #[default]
    Structural,
    DisplayString,
}

/// Display mode: which transformation (if any) reshapes the fetched list
/// before rendering
///
/// Modes always apply to the raw fetched list, never to the output of
/// another mode, so switching modes cannot compound transformations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayMode {
    /// Raw fetched list, unchanged.
    Default,
    /// Keep only products of `brand`, discounting each price by `percent`.
    BrandDiscount { brand: String, percent: f64 },
    /// Reverse the brand string of every product of `brand`.
    ReversedBrand { brand: String },
    /// Keep products priced strictly inside `(min, max)` major units and
    /// shippable to `country`, sorted by ascending price.
    ShippableRange {
        min: f64,
        max: f64,
        country: String,
        magnitude: PriceMagnitude,
    },
    /// Identity over the data; renderers add a deposited-time badge.
    Deposited,
}

/// Derived list handed to the presentation layer
#[derive(Debug, Serialize, Clone)]
pub struct CatalogView {
    /// Search term the list was fetched with, if any.
    pub query: Option<String>,
    pub mode: DisplayMode,
    /// Size of the raw fetched list, before the mode was applied.
    pub total_fetched: usize,
    pub products: Vec<Product>,
}

/// Keep only products of `brand`, re-pricing each at a `percent` discount
///
/// Non-matching products are excluded entirely; this is a filter plus a
/// price rewrite, not a plain map. The discounted minor-unit amount is
/// `original * (100 - percent) / 100` rounded half away from zero, and the
/// display string is regenerated from it. `percent` is not range-checked
/// here: callers own validation, and a percent outside [0, 100] produces
/// out-of-range (possibly negative) amounts rather than an error.
pub fn discount_by_brand(products: &[Product], brand: &str, percent: f64) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.brand == brand)
        .map(|product| {
            let cents = discounted_cents(product.price.price_in_cents, percent);
            let mut product = product.clone();
            product.price.price_in_cents = cents;
            product.price.formatted = format_minor_units(cents, &product.price.currency);
            product
        })
        .collect()
}

fn discounted_cents(cents: i64, percent: f64) -> i64 {
    (cents as f64 * ((100.0 - percent) / 100.0)).round() as i64
}

/// Reverse the brand string of every product whose brand equals `brand`
///
/// Maps over the whole list: length and order are preserved, non-matching
/// products pass through untouched, and only the brand field of matching
/// entries changes. Reversal is by character, not by byte, and reversing
/// the reversed name restores the original.
pub fn reverse_brand_name(products: &[Product], brand: &str) -> Vec<Product> {
    products
        .iter()
        .map(|product| {
            if product.brand == brand {
                let mut product = product.clone();
                product.brand = product.brand.chars().rev().collect();
                product
            } else {
                product.clone()
            }
        })
        .collect()
}

/// Keep products priced strictly inside `(min, max)` and shippable to
/// `country`, sorted by ascending minor-unit amount
///
/// Bounds are exclusive on both ends and expressed in major units. The
/// price magnitude is read per `magnitude`; with the legacy display-string
/// source a price without any digits counts as magnitude 0, which excludes
/// the product whenever `min >= 0`. The sort key is always the structural
/// minor-unit amount, and the sort is stable.
pub fn filter_by_price_and_shipping(
    products: &[Product],
    min: f64,
    max: f64,
    country: &str,
    magnitude: PriceMagnitude,
) -> Vec<Product> {
    let mut kept: Vec<Product> = products
        .iter()
        .filter(|product| {
            let price = price_magnitude(product, magnitude);
            price > min
                && price < max
                && product.shippable_countries.iter().any(|c| c == country)
        })
        .cloned()
        .collect();

    kept.sort_by_key(|product| product.price.price_in_cents);
    kept
}

/// Price magnitude of a product in major units, per the selected source
fn price_magnitude(product: &Product, magnitude: PriceMagnitude) -> f64 {
    match magnitude {
        PriceMagnitude::Structural => product.price.price_in_cents as f64 / 100.0,
        PriceMagnitude::DisplayString => {
            extract_display_magnitude(&product.price.formatted).unwrap_or(0.0)
        }
    }
}

/// Apply a display mode to the raw fetched list
///
/// The input list is borrowed immutably and never mutated; every call
/// derives a fresh list, so callers re-deriving after a mode switch get a
/// result independent of any previous derivation.
pub fn apply_display_mode(products: &[Product], mode: &DisplayMode) -> Vec<Product> {
    match mode {
        DisplayMode::Default | DisplayMode::Deposited => products.to_vec(),
        DisplayMode::BrandDiscount { brand, percent } => {
            discount_by_brand(products, brand, *percent)
        }
        DisplayMode::ReversedBrand { brand } => reverse_brand_name(products, brand),
        DisplayMode::ShippableRange {
            min,
            max,
            country,
            magnitude,
        } => filter_by_price_and_shipping(products, *min, *max, country, *magnitude),
    }
}

/// Build the presentation view for a fetched list under `mode`
pub fn build_catalog_view(
    products: &[Product],
    mode: &DisplayMode,
    query: Option<&str>,
) -> CatalogView {
    CatalogView {
        query: query.map(str::to_string),
        mode: mode.clone(),
        total_fetched: products.len(),
        products: apply_display_mode(products, mode),
    }
}
