use crate::prelude::{println, *};
use chrono::Utc;
use colored::Colorize;
use vitrine_core::catalog::{build_catalog_view, CatalogView, DisplayMode};

use super::{
    create_catalog_client, fetch_products, mode_label, resolve_display_mode, CatalogConfig,
    ModeOptions,
};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Search term forwarded to the catalog API
    #[arg(short, long, env = "VITRINE_QUERY")]
    pub query: Option<String>,

    #[clap(flatten)]
    pub mode: ModeOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output as a compact table
    #[arg(long)]
    pub table: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let config = CatalogConfig::from_global(&global)?;
    let mode = resolve_display_mode(options.mode.mode, &options.mode)?;

    if global.verbose {
        println!("Fetching products (mode: {})...", mode_label(&mode));
    }

    // Create spinner for progress indication
    let spinner = new_spinner();

    let view = list_products_data(&config, options.query.as_deref(), &mode, Some(&spinner)).await;

    spinner.finish_and_clear();
    let view = view?;

    if options.json {
        output_json(&view)?;
    } else if options.table {
        build_catalog_table(&view).printstd();
    } else {
        output_formatted(&view)?;
    }

    Ok(())
}

/// Fetches the product list and derives the presentation view for `mode`
pub async fn list_products_data(
    config: &CatalogConfig,
    query: Option<&str>,
    mode: &DisplayMode,
    spinner: Option<&indicatif::ProgressBar>,
) -> Result<CatalogView> {
    let client = create_catalog_client()?;
    let products = fetch_products(&client, config, query, spinner).await?;

    // Delegate to pure transformation function
    Ok(build_catalog_view(&products, mode, query))
}

/// Convert catalog view to JSON string
fn format_catalog_json(view: &CatalogView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Build a compact table of the derived list
fn build_catalog_table(view: &CatalogView) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "#",
        "Name",
        "Brand",
        "Price",
        "Seller",
        "Ships to"
    ]);

    for (idx, product) in view.products.iter().enumerate() {
        table.add_row(prettytable::row![
            (idx + 1).to_string(),
            &product.name,
            &product.brand,
            &product.price.formatted,
            &product.seller.country,
            product.shippable_countries.join(" ")
        ]);
    }

    table
}

/// Usage hints appended after the card list
fn format_usage_text() -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "USAGE".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!("\n{}:\n", "To search".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        "vitrine products list --query <term>".cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To switch display mode".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "vitrine products list --mode <default|discount|reversed|shippable|deposited>".cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To tune mode parameters".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "vitrine products list --mode discount --brand <name> --discount <percent>".cyan()
    ));
    result.push_str(&format!(
        "  {}\n",
        "vitrine products list --mode shippable --min-price <n> --max-price <n> --country <code>"
            .cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", "vitrine products list --json".cyan()));

    result.push_str(&format!(
        "\n{}:\n",
        "To browse interactively".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", "vitrine products browse".cyan()));

    result.push('\n');
    result
}

fn output_json(view: &CatalogView) -> Result<()> {
    let json = format_catalog_json(view)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(view: &CatalogView) -> Result<()> {
    let formatted = super::format_catalog_text(view, Utc::now());
    print!("{}", formatted);
    print!("{}", format_usage_text());
    Ok(())
}
