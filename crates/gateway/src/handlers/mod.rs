//! HTTP request handlers

pub mod health;
pub mod newspapers;
pub mod papers;
