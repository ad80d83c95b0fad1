//! Use-case handlers.
//!
//! One async function per command or query. Each validates its input, calls
//! the matching repository and maps the result to a response DTO. Route
//! functions stay thin and only deal with HTTP extraction.

pub mod cart_items;
pub mod orders;
pub mod users;
