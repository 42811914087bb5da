//! Lucky is a terminal-first chat companion backed by a local user table.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the user store and session, the chat modes with their
//!   system instructions, request construction, and runtime state.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives input, scrolling and display updates.
//! - [`commands`] implements the slash commands typed into the input line.
//! - [`api`] defines the generate-content payloads and the provider call.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::run`], which signs the user in and dispatches
//! into [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
