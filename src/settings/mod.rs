//! Settings come from a TOML file picked by build profile or `--settings`,
//! then `FILMORATE__*` environment variables, then CLI flags.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
