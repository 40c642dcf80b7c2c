use crate::prelude::{println, *};
use chrono::{DateTime, Utc};
use colored::Colorize;
use indicatif::ProgressBar;
use vitrine_core::catalog::{CatalogView, DisplayMode, PriceMagnitude, Product};
use vitrine_core::country::flag_emoji;
use vitrine_core::timeago::deposited_ago;

pub mod browse;
pub mod list;

// Re-export public data functions
pub use list::list_products_data;

// Re-export domain types from core
pub use vitrine_core::catalog::{apply_display_mode, build_catalog_view};

// Storefront presets for the canned display modes.
const DISCOUNT_BRAND: &str = "Off-White";
const DISCOUNT_PERCENT: f64 = 10.0;
const REVERSED_BRAND: &str = "Louis Vuitton";
const RANGE_MIN_PRICE: f64 = 500.0;
const RANGE_MAX_PRICE: f64 = 1500.0;
const RANGE_COUNTRY: &str = "UK";

#[derive(Debug, clap::Parser)]
#[command(name = "products")]
#[command(about = "Product catalog operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List catalog products under a display mode
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Browse the catalog interactively with debounced search
    #[clap(name = "browse")]
    Browse(browse::BrowseOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        if let Some(api_base) = &global.api_base {
            println!("Catalog API Base: {}", api_base);
            println!();
        }
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Browse(options) => browse::run(options, global).await,
    }
}

/// Catalog API configuration, resolved once and passed explicitly to the
/// fetch functions
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
}

impl CatalogConfig {
    /// Resolve the configuration from the global CLI options (`--api-base`
    /// flag or `VITRINE_API_BASE` environment variable).
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let base_url = global.api_base.clone().ok_or(Error::MissingApiBase)?;
        Ok(Self { base_url })
    }
}

/// HTTP client for the catalog API
pub fn create_catalog_client() -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Build the products endpoint URL for an optional search term
///
/// An empty or absent term fetches the whole catalog; anything else is
/// percent-encoded into `?q=`.
fn products_url(base: &str, query: Option<&str>) -> String {
    let base = base.trim_end_matches('/');
    match query {
        Some(q) if !q.is_empty() => format!("{base}/products?q={}", urlencoding::encode(q)),
        _ => format!("{base}/products"),
    }
}

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Fetch the product list, optionally filtered by a search term
pub async fn fetch_products(
    client: &reqwest::Client,
    config: &CatalogConfig,
    query: Option<&str>,
    spinner: Option<&ProgressBar>,
) -> Result<Vec<Product>> {
    let url = products_url(&config.base_url, query);

    set_spinner_msg(spinner, "Fetching products...");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Failed to fetch products: {e}")))?;

    if !response.status().is_success() {
        return Err(eyre!(Error::Network(format!(
            "Failed to fetch products: HTTP {}",
            response.status()
        ))));
    }

    set_spinner_msg(spinner, "Parsing response...");
    let products: Vec<Product> = response
        .json()
        .await
        .map_err(|e| Error::Network(format!("Failed to parse products response: {e}")))?;

    Ok(products)
}

/// Canned display modes, mirroring the storefront's mode picker
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Raw fetched list
    Default,
    /// Discounted prices for one brand
    Discount,
    /// Reversed brand names for one brand
    Reversed,
    /// Price range plus shipping destination filter
    Shippable,
    /// Deposit-time badges on every card
    Deposited,
}

/// Display mode selection shared by the list and browse commands
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ModeOptions {
    /// Display mode applied to the fetched list
    #[arg(long, env = "VITRINE_MODE", default_value = "default")]
    pub mode: Mode,

    /// Brand targeted by the discount and reversed modes
    #[arg(long)]
    pub brand: Option<String>,

    /// Discount percentage for the discount mode (0-100)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Lower price bound for the shippable mode, exclusive, in major units
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Upper price bound for the shippable mode, exclusive, in major units
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Country code the shippable mode filters on
    #[arg(long)]
    pub country: Option<String>,

    /// Read price magnitudes by re-parsing the formatted price string
    /// instead of the minor-unit amount (legacy storefront behavior)
    #[arg(long)]
    pub parse_display_price: bool,
}

/// Combine a mode kind with its parameter flags, falling back to the
/// storefront presets
pub fn resolve_display_mode(kind: Mode, options: &ModeOptions) -> Result<DisplayMode> {
    let mode = match kind {
        Mode::Default => DisplayMode::Default,
        Mode::Deposited => DisplayMode::Deposited,
        Mode::Discount => {
            let percent = options.discount.unwrap_or(DISCOUNT_PERCENT);
            if !(0.0..=100.0).contains(&percent) {
                return Err(eyre!(Error::Generic(format!(
                    "Discount must be between 0 and 100, got {percent}"
                ))));
            }
            DisplayMode::BrandDiscount {
                brand: options
                    .brand
                    .clone()
                    .unwrap_or_else(|| DISCOUNT_BRAND.to_string()),
                percent,
            }
        }
        Mode::Reversed => DisplayMode::ReversedBrand {
            brand: options
                .brand
                .clone()
                .unwrap_or_else(|| REVERSED_BRAND.to_string()),
        },
        Mode::Shippable => DisplayMode::ShippableRange {
            min: options.min_price.unwrap_or(RANGE_MIN_PRICE),
            max: options.max_price.unwrap_or(RANGE_MAX_PRICE),
            country: options
                .country
                .clone()
                .unwrap_or_else(|| RANGE_COUNTRY.to_string()),
            magnitude: if options.parse_display_price {
                PriceMagnitude::DisplayString
            } else {
                PriceMagnitude::Structural
            },
        },
    };

    Ok(mode)
}

/// Short human label for the active display mode, used in headers
pub fn mode_label(mode: &DisplayMode) -> String {
    match mode {
        DisplayMode::Default => "default".to_string(),
        DisplayMode::BrandDiscount { brand, percent } => format!("{percent}% off {brand}"),
        DisplayMode::ReversedBrand { brand } => format!("reversed {brand}"),
        DisplayMode::ShippableRange {
            min, max, country, ..
        } => format!("{min} to {max} shippable to {country}"),
        DisplayMode::Deposited => "deposited".to_string(),
    }
}

/// Convert a derived catalog view to formatted text with colors
///
/// Shared by the one-shot list command and the interactive browse loop.
/// `now` is the clock used for deposit badges; tests pin it.
pub fn format_catalog_text(view: &CatalogView, now: DateTime<Utc>) -> String {
    let mut result = String::new();
    let show_deposited = matches!(view.mode, DisplayMode::Deposited);

    // Header
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "PRODUCT CATALOG ({} of {} fetched, mode: {})",
            view.products.len(),
            view.total_fetched,
            mode_label(&view.mode)
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if let Some(query) = &view.query {
        result.push_str(&format!(
            "{}: {}\n",
            "Search".green(),
            query.bright_white()
        ));
    }

    if view.products.is_empty() {
        let message = if view.query.is_some() {
            "No products found."
        } else {
            "Catalog returned no products."
        };
        result.push_str(&format!("\n{}\n", message.yellow()));
    } else {
        for (idx, product) in view.products.iter().enumerate() {
            result.push_str(&format_product_card(idx + 1, product, show_deposited, now));
        }
    }

    result
}

/// Render one product card
fn format_product_card(
    position: usize,
    product: &Product,
    show_deposited: bool,
    now: DateTime<Utc>,
) -> String {
    let mut result = String::new();

    let name = if product.name.is_empty() {
        "(unnamed product)"
    } else {
        product.name.as_str()
    };
    result.push_str(&format!(
        "\n{} {}\n",
        format!("[{position}]").yellow().bold(),
        name.white().bold()
    ));

    let mut segments: Vec<String> = Vec::new();
    if !product.brand.is_empty() {
        segments.push(format!(
            "{}: {}",
            "Brand".green(),
            product.brand.bright_white()
        ));
    }
    if !product.seller.country.is_empty() {
        let seller = flag_emoji(&product.seller.country)
            .unwrap_or_else(|| product.seller.country.clone());
        segments.push(format!("{}: {}", "Seller".green(), seller));
    }
    if !segments.is_empty() {
        result.push_str(&format!("    {}\n", segments.join(" | ")));
    }

    let mut segments: Vec<String> = Vec::new();
    if !product.price.formatted.is_empty() {
        segments.push(format!(
            "{}: {}",
            "Price".green(),
            product.price.formatted.bright_yellow()
        ));
    }
    if !product.shippable_countries.is_empty() {
        let flags = product
            .shippable_countries
            .iter()
            .map(|code| flag_emoji(code).unwrap_or_else(|| code.clone()))
            .collect::<Vec<_>>()
            .join(" ");
        segments.push(format!("{}: {}", "Ships to".green(), flags));
    }
    if !segments.is_empty() {
        result.push_str(&format!("    {}\n", segments.join(" | ")));
    }

    if show_deposited {
        if let Some(badge) = product
            .deposited_on
            .as_deref()
            .and_then(|raw| deposited_ago(raw, now))
        {
            result.push_str(&format!(
                "    {}: {}\n",
                "Deposited".green(),
                badge.bright_magenta()
            ));
        }
    }

    let mut segments: Vec<String> = Vec::new();
    if !product.id.is_empty() {
        segments.push(format!("{}: {}", "ID".green(), product.id.bright_white()));
    }
    if !product.photo_url.is_empty() {
        segments.push(format!(
            "{}: {}",
            "Photo".green(),
            product.photo_url.cyan().underline()
        ));
    }
    if !segments.is_empty() {
        result.push_str(&format!("    {}\n", segments.join(" | ")));
    }

    result
}
