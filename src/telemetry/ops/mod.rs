pub mod catalog;
pub mod scrape;
pub mod send;
pub mod run;
