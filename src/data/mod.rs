//! Data layer: cell types, tables and file loading.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table (typed cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  Vec<Row>, ordered column names
//!   └──────────┘
//!        │
//!        ▼
//!   scoring pipeline (crate::scoring)
//! ```
//!
//! `demo` builds a synthetic transit dataset for trying the app out.

pub mod demo;
pub mod loader;
pub mod model;
