pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn catalog() -> LogCtx<ops::catalog::Catalog> { LogCtx::new(config::logs_are_json()) }
pub fn scrape() -> LogCtx<ops::scrape::Scrape> { LogCtx::new(config::logs_are_json()) }
pub fn send() -> LogCtx<ops::send::Deliver> { LogCtx::new(config::logs_are_json()) }
pub fn run() -> LogCtx<ops::run::Run> { LogCtx::new(config::logs_are_json()) }
