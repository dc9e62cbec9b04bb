//! Rental aggregation.
//!
//! This module groups the typed rental records into the summary tables the
//! dashboard renders, applies the bucket policy, and bundles everything into
//! a [`DashboardSummary`](types::DashboardSummary).

pub mod aggregate;
pub mod labels;
pub mod summary;
pub mod types;
pub mod utility;
