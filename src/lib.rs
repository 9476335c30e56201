pub mod app;
pub mod config;
pub mod event;
pub mod identity;
pub mod logging;
pub mod net;
pub mod prompt;
pub mod score;
pub mod session;
pub mod ui;
