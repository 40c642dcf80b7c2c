//! Core library for vitrine
//!
//! This crate implements the **Functional Core** of the vitrine application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The vitrine project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`vitrine_core`** (this crate): Pure transformation functions with zero I/O
//! - **`vitrine`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! The shell decides *when* to fetch and *where* to print; this crate only
//! decides *what* a fetched product list turns into under a display mode.
//!
//! # Module Organization
//!
//! The core crate is organized by domain:
//!
//! - [`catalog`]: Product model, display modes, and the list transformations
//! - [`money`]: Minor-unit price formatting and the legacy display-string parse
//! - [`timeago`]: Calendar distance rendering for deposit timestamps
//! - [`country`]: Country code to flag emoji mapping
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing API responses and outputs
//! - **Transformation functions**: Pure functions that convert API data to domain models
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use vitrine_core::catalog::{apply_display_mode, DisplayMode, Product};
//!
//! // Create fixture data (no HTTP required)
//! let products = vec![
//!     Product {
//!         brand: "Off-White".to_string(),
//!         // ... other fields
//!         ..Default::default()
//!     }
//! ];
//!
//! // Transform using pure function
//! let mode = DisplayMode::BrandDiscount {
//!     brand: "Off-White".to_string(),
//!     percent: 10.0,
//! };
//! let discounted = apply_display_mode(&products, &mode);
//!
//! // Assert on results (no mocking needed)
//! assert_eq!(discounted.len(), 1);
//! ```
//!
//! # Pattern Reference
//!
//! This architecture is based on Gary Bernhardt's Functional Core, Imperative Shell pattern.
//! The key insight: **data transformation logic should be pure and ignorant of where data
//! comes from or where it goes**.

pub mod catalog;
pub mod country;
pub mod money;
pub mod timeago;
