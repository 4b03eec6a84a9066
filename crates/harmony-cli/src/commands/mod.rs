pub mod config;
pub mod directive;
pub mod evaluate;
