//! Common test utilities for weatherglass integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod weather_server;
