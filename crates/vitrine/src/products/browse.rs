use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::prelude::{eprintln, println, *};
use chrono::Utc;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use vitrine_core::catalog::{build_catalog_view, DisplayMode, Product};

use super::{
    create_catalog_client, fetch_products, resolve_display_mode, CatalogConfig, Mode, ModeOptions,
};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BrowseOptions {
    #[clap(flatten)]
    pub mode: ModeOptions,

    /// Quiet period before a typed search term fires, in milliseconds
    #[arg(long, env = "VITRINE_DEBOUNCE_MS", default_value = "500")]
    pub debounce_ms: u64,
}

/// Interactive catalog browser
///
/// Reads lines from stdin: plain text is a debounced search term, `:mode
/// <name>` re-derives the view from the last fetched list without another
/// request, and `:quit` (or closing stdin) exits. Fetches run one at a
/// time inside the loop, so a slow response can never overwrite a newer
/// one.
pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let config = CatalogConfig::from_global(&global)?;
    let mut mode = resolve_display_mode(options.mode.mode, &options.mode)?;
    let client = create_catalog_client()?;

    let mut query: Option<String> = None;
    let mut raw_products: Vec<Product> = Vec::new();

    match fetch_with_spinner(&client, &config, None).await {
        Ok(products) => raw_products = products,
        Err(err) => print_fetch_error(&err, global.verbose),
    }
    show(&raw_products, &mode, query.as_deref());

    let mut debouncer: Debouncer<String> =
        Debouncer::new(Duration::from_millis(options.debounce_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = debouncer.deadline();

        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(line) => match classify_input(&line) {
                        BrowseInput::Quit => break,
                        BrowseInput::SwitchMode(name) => match switch_mode(name, &options.mode) {
                            Ok(new_mode) => {
                                mode = new_mode;
                                // Same raw list, new derivation; no refetch.
                                show(&raw_products, &mode, query.as_deref());
                            }
                            Err(err) => eprintln!("{}", err.to_string().red()),
                        },
                        BrowseInput::Search(term) => {
                            debouncer.update(term.to_string(), Instant::now());
                        }
                    },
                }
            }
            _ = sleep_until(deadline), if deadline.is_some() => {
                if let Some(term) = debouncer.take_settled(Instant::now()) {
                    let next_query = if term.is_empty() { None } else { Some(term) };
                    if next_query.as_deref() == query.as_deref() {
                        continue;
                    }
                    query = next_query;

                    match fetch_with_spinner(&client, &config, query.as_deref()).await {
                        Ok(products) => {
                            raw_products = products;
                            show(&raw_products, &mode, query.as_deref());
                        }
                        Err(err) => {
                            raw_products.clear();
                            print_fetch_error(&err, global.verbose);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

async fn fetch_with_spinner(
    client: &reqwest::Client,
    config: &CatalogConfig,
    query: Option<&str>,
) -> Result<Vec<Product>> {
    // Create spinner for progress indication
    let spinner = new_spinner();
    let result = fetch_products(client, config, query, Some(&spinner)).await;
    spinner.finish_and_clear();

    result
}

fn show(products: &[Product], mode: &DisplayMode, query: Option<&str>) {
    let view = build_catalog_view(products, mode, query);
    print!("{}", super::format_catalog_text(&view, Utc::now()));

    println!(
        "\n{} {} {} {} {}",
        "Type to search.".bright_white(),
        ":mode <name>".cyan(),
        "switches the display mode,".bright_white(),
        ":quit".cyan(),
        "exits.".bright_white()
    );
}

fn print_fetch_error(err: &color_eyre::eyre::Report, verbose: bool) {
    eprintln!("{}", "Could not load products.".red().bold());
    if verbose {
        eprintln!("{}", err.to_string().bright_black());
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// One line of browse input, classified
#[derive(Debug, PartialEq)]
enum BrowseInput<'a> {
    Quit,
    SwitchMode(&'a str),
    Search(&'a str),
}

fn classify_input(line: &str) -> BrowseInput<'_> {
    let line = line.trim();

    if line == ":quit" || line == ":q" {
        return BrowseInput::Quit;
    }

    if let Some(rest) = line.strip_prefix(":mode") {
        if rest.is_empty() || rest.starts_with(' ') {
            return BrowseInput::SwitchMode(rest.trim());
        }
    }

    BrowseInput::Search(line)
}

/// Parse a `:mode` argument and resolve it with the CLI parameter flags
fn switch_mode(name: &str, options: &ModeOptions) -> Result<DisplayMode> {
    let kind = <Mode as clap::ValueEnum>::from_str(name, true)
        .map_err(|_| Error::UnknownDisplayMode(name.to_string()))?;

    resolve_display_mode(kind, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_options() -> ModeOptions {
        ModeOptions {
            mode: Mode::Default,
            brand: None,
            discount: None,
            min_price: None,
            max_price: None,
            country: None,
            parse_display_price: false,
        }
    }

    #[test]
    fn test_classify_input_quit() {
        assert_eq!(classify_input(":quit"), BrowseInput::Quit);
        assert_eq!(classify_input(":q"), BrowseInput::Quit);
        assert_eq!(classify_input("  :quit  "), BrowseInput::Quit);
    }

    #[test]
    fn test_classify_input_mode_switch() {
        assert_eq!(
            classify_input(":mode discount"),
            BrowseInput::SwitchMode("discount")
        );
        assert_eq!(
            classify_input(":mode   shippable  "),
            BrowseInput::SwitchMode("shippable")
        );
    }

    #[test]
    fn test_classify_input_bare_mode_command() {
        assert_eq!(classify_input(":mode"), BrowseInput::SwitchMode(""));
    }

    #[test]
    fn test_classify_input_mode_without_space_is_a_search() {
        assert_eq!(
            classify_input(":modediscount"),
            BrowseInput::Search(":modediscount")
        );
    }

    #[test]
    fn test_classify_input_search_term() {
        assert_eq!(classify_input("nike"), BrowseInput::Search("nike"));
        assert_eq!(classify_input("  silk scarf "), BrowseInput::Search("silk scarf"));
    }

    #[test]
    fn test_classify_input_empty_line_clears_search() {
        assert_eq!(classify_input(""), BrowseInput::Search(""));
        assert_eq!(classify_input("   "), BrowseInput::Search(""));
    }

    #[test]
    fn test_switch_mode_known_names() {
        let options = create_test_options();

        assert_eq!(
            switch_mode("default", &options).unwrap(),
            DisplayMode::Default
        );
        assert_eq!(
            switch_mode("deposited", &options).unwrap(),
            DisplayMode::Deposited
        );
        assert!(matches!(
            switch_mode("discount", &options).unwrap(),
            DisplayMode::BrandDiscount { .. }
        ));
    }

    #[test]
    fn test_switch_mode_is_case_insensitive() {
        let options = create_test_options();

        assert_eq!(
            switch_mode("DEFAULT", &options).unwrap(),
            DisplayMode::Default
        );
    }

    #[test]
    fn test_switch_mode_applies_parameter_flags() {
        let mut options = create_test_options();
        options.brand = Some("Nike".to_string());

        let mode = switch_mode("reversed", &options).unwrap();

        assert_eq!(
            mode,
            DisplayMode::ReversedBrand {
                brand: "Nike".to_string(),
            }
        );
    }

    #[test]
    fn test_switch_mode_unknown_name() {
        let options = create_test_options();

        let result = switch_mode("sideways", &options);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown display mode: sideways"));
    }
}
