//! Calendar-aware age calculator: year/month/day breakdown, flat-rate
//! totals, a themed SVG card with falling background numbers, and spoken
//! output through a host text-to-speech program.

pub mod age;
pub mod background;
pub mod config;
pub mod error;
pub mod report;
pub mod speech;
pub mod svg;

pub use age::ElapsedAge;
pub use error::{AgeError, AgeResult};
pub use report::{AgeReport, Summary};
