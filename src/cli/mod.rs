//! Command-line front end over fixture files.

pub mod args;
pub mod commands;
pub mod fixture;
pub mod reporter;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/fixture_tests.rs"]
mod fixture_tests;
#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod commands_tests;
