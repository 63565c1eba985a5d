//! Kizami CLI library
//!
//! This library provides the command-line interface for the kizami
//! document chunking engine.

pub mod cli;
pub mod output;
pub mod pages;
