//! Parsing of the two kinds of page the archiver reads: the catalog (home)
//! page listing every mix, and each mix's landing page linking its files.
//!
//! Both parsers are pure: they take already-fetched bytes and never touch the
//! network.

mod catalog;
mod consts;
mod detail;
pub mod error;
pub mod models;

pub use crate::catalog::{Catalog, landing_path, parse_catalog};
pub use crate::detail::{DetailPage, parse_detail};
