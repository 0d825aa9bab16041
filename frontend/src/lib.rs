slint::include_modules!();

extern crate pretty_env_logger;
#[macro_use] extern crate log;

pub mod app;
