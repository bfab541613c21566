//! Shared traits for the brick-sort workspace.
//!
//! This crate holds the element bound shared by `brick-kernel` and
//! `brick-sort`, so that downstream crates can name it (or implement the
//! underlying traits for their own numeric types) without depending on the
//! kernel machinery.

pub mod element;

pub use element::SortElement;
