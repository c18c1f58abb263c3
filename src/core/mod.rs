pub mod commands;
pub mod config;
pub mod dirstack;
pub mod dispatch;
pub mod history;

pub use dispatch::Dispatcher;
