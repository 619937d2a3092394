//! Droneroute CLI library.
//!
//! Terminal styling and output formatting shared by the `droneroute-cli`
//! binary and its tests.

pub mod output;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_helpers;
