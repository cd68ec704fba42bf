// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Retro Core
//!
//! Core library for the retro CLI - periodic GitHub activity reports.
//!
//! This crate provides reusable components for:
//! - GitHub API integration (authentication, search, merge status)
//! - Rate-limit aware pagination
//! - Activity classification into report categories
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retro_core::{
//!     GithubMergeCheck, ReportParams, SystemClock, TimeWindow, build_report, create_client,
//!     standard_rules,
//! };
//!
//! # async fn example() -> retro_core::Result<()> {
//! let client = create_client()?;
//! let clock = SystemClock;
//! let merge_check = GithubMergeCheck::new(client.clone());
//!
//! let window = TimeWindow::ending_at(chrono::Utc::now(), chrono::Duration::days(14));
//!
//! let report = build_report(
//!     ReportParams::builder()
//!         .client(&client)
//!         .clock(&clock)
//!         .merge_check(&merge_check)
//!         .user("octocat")
//!         .window(window)
//!         .cadence("biweekly".to_string())
//!         .rules(standard_rules())
//!         .build(),
//! )
//! .await?;
//!
//! println!("{} items in the window", report.item_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - Rule-driven partitioning of the working set
//! - [`clock`] - Time source abstraction with a test fake
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (auth, search, pulls)
//! - [`item`] - The tracked work item model
//! - [`page`] - Generic page walking
//! - [`ratelimit`] - Rate-limit recovery
//! - [`report`] - Report assembly pipeline
//! - [`window`] - Reporting windows
//! - [`workset`] - Deduplicated item collection

// ============================================================================
// Error Handling
// ============================================================================

pub use error::RetroError;

/// Convenience Result type for retro operations.
///
/// This is equivalent to `std::result::Result<T, RetroError>`.
pub type Result<T> = std::result::Result<T, RetroError>;

// ============================================================================
// Time
// ============================================================================

pub use clock::{Clock, FakeClock, SystemClock};
pub use window::{TimeWindow, duration_as_adj};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, MAX_PER_PAGE, ReportConfig, config_dir, config_file_path, load_config,
};

// ============================================================================
// Work Items
// ============================================================================

pub use item::{Item, ItemKind, ItemState, ReactionCounts, StateReason, Status, format_duration};
pub use workset::WorkingSet;

// ============================================================================
// Pagination
// ============================================================================

pub use page::{Page, PageMeta, PageState, paginate};
pub use ratelimit::wait_if_rate_limited;

// ============================================================================
// Classification
// ============================================================================

pub use classify::{Category, Predicate, REMAINING_LABEL, Rule, detailed_rules, standard_rules};

// ============================================================================
// Report Assembly
// ============================================================================

pub use report::{MergeCheck, Report, ReportParams, build_report};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::auth::{TokenSource, create_client};
pub use github::current_username;
pub use github::pulls::GithubMergeCheck;

// ============================================================================
// Modules
// ============================================================================

pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod github;
pub mod item;
pub mod page;
pub mod ratelimit;
pub mod report;
pub mod window;
pub mod workset;
