//! CLI subcommand implementations.

pub mod history;
pub mod last;
pub mod meta;
pub mod verify;

/// Note on stderr when every ticker was dropped or none were given.
pub(crate) fn report_empty(what: &str) {
    eprintln!("No {} returned (all tickers failed or none were valid)", what);
}
