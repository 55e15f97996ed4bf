pub mod auth;
pub mod config;
pub mod discovery;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod storage;
pub mod telegram;
pub mod views;

#[cfg(test)]
pub(crate) mod testutil;
