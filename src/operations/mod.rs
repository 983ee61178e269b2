//! Operations module provides the command logic behind the CLI

pub mod search;
