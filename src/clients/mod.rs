pub mod quotable;
