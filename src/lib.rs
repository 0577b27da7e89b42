pub mod apis;
pub mod arguments;
pub mod config;
pub mod errors;
pub mod logger;
pub mod market_data;
pub mod notifications;
pub mod pipeline;
pub mod report;
pub mod run;
pub mod scheduler;
pub mod services;
pub mod webserver;

#[cfg(test)]
mod test_support;
