//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; shared document loading is in
//! `utils`.

mod completions;
mod model;
mod models;
mod responses;
mod utils;

pub use completions::handle_completions;
pub use model::handle_model;
pub use models::handle_models;
pub use responses::handle_responses;
