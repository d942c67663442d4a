pub mod prelude;

pub mod sets;
pub mod themes;
pub mod users;
