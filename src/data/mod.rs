/// Data layer: core types, loading, date parsing, filtering and export.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  list sheets, read one sheet → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  validate columns, coerce dates, month mask → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  preview strings, CSV bytes
///   └──────────┘
/// ```

pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::FilterError;
