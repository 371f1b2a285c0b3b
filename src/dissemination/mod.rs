//! Market-data dissemination fabric: a per-symbol subscriber registry with
//! independent market-data and trade channels.

mod registry;

pub use registry::Dissemination;
