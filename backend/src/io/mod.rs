//! # IO Module
//!
//! Interface layer between the browser and the domain logic: the axum
//! handlers in [`rest`] and the HTML rendering in [`html`].

pub mod html;
pub mod rest;

pub use rest::*;
