//! Library components for the versification CLI.

#![deny(unsafe_code)]

pub mod logging;
pub mod rules;
