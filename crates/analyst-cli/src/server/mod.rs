//! HTTP service: upload a dataset, get insights, request chart data.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
