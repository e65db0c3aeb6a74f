//! HTTP handlers

pub mod health;
pub mod agent;
pub mod dashboard;
pub mod vault;

#[cfg(test)]
mod tests;
