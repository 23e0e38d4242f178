//! Causerie is a terminal-first chat client for self-hosted chat service
//! backends.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the conversation transcript, the model
//!   catalog, the submission gate, and configuration.
//! - [`api`] defines the wire payloads and the backend client used to reach
//!   the chat, model-listing, and health endpoints.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//! - [`cli`] parses arguments and dispatches the non-interactive
//!   subcommands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`core::app`] and [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
