pub mod health;
pub mod orchestrate;
