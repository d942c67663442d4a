mod list;
mod seed;

pub use list::{cmd_list_sets, cmd_list_themes};
pub use seed::{cmd_seed, read_seed_file};
