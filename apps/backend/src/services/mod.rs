//! Application services

pub mod study;
