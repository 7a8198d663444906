//! Seoul transit query server.
//!
//! Answers questions about Seoul's subway, buses and public bikes by
//! querying the city's open-data feeds, and exposes the answers as tools
//! over JSON-RPC.

pub mod config;
pub mod domain;
pub mod feeds;
pub mod render;
pub mod search;
pub mod tools;
pub mod web;
