//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod login;
mod resource;
mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use login::handle_login;
pub use resource::{
    handle_create, handle_delete, handle_fetch, handle_get, handle_list, handle_replace,
    handle_search,
};
