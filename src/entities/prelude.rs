pub use super::sets::Entity as Sets;
pub use super::themes::Entity as Themes;
pub use super::users::Entity as Users;
