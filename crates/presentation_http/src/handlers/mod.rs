//! HTTP request handlers

pub mod health;
pub mod telegram;
