pub mod hero;
pub mod template;
