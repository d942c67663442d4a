pub mod set;
pub mod theme;
pub mod user;
