//! pokedex-gallery
//!
//! An async client for browsing the PokeAPI creature gallery one page at a
//! time: list a page, resolve every entry's detail record concurrently, and
//! pick one to show in a detail drawer.
//!
//! # Quick Start
//!
//! ```ignore
//! use pokedex_gallery::{Client, PageController, render};
//!
//! let controller = PageController::new(Client::new()); // reads POKEAPI_BASE_URL from env
//! controller.load_initial().await;
//! controller.select_by_name("pikachu");
//! println!("{}", render::render(&controller.snapshot()));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub mod pokemon;

pub mod controller;
pub mod render;

// Re-export key types at crate root for ergonomic imports.
pub use client::Client;
pub use controller::{ControllerOptions, CycleOutcome, PageController, PageRequest, PageState};
pub use error::Error;
pub use pokemon::ListParams;
pub use types::*;
