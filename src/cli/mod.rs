mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_copy, handle_delete, handle_list, handle_path, handle_save, handle_show, preview,
};
