//! Output rendering

pub mod csv;

pub use csv::render_csv;
