//! Build input documents for the `meal` nutrition calculator, and run it.
//!
//! A document combines a [body::Body], a diet ([foods::Foods]) and display
//! options; see [document::Document]. The calculation itself is done by the
//! external program, reached through [invoker::Invoke].

pub mod body;
pub mod document;
pub mod errors;
pub mod foods;
pub mod invoker;
pub mod prices;
pub mod sample;
pub mod user_foods;
