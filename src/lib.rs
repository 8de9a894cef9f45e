//! Filter spreadsheet rows whose Birth, Death or Other date falls in a
//! given month, and export the result as CSV.

pub mod config;
pub mod data;
pub mod pipeline;
