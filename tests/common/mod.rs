//! Common test utilities for texfast binary tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and home directories
//! - `FAKE_TEX`: a shell script standing in for pdftex/xetex

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
