mod cli;
mod types;

pub use cli::Cli;
pub use types::Config;
