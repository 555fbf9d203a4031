//! Naming helpers shared by the directory and the resolver.

pub mod text;

pub use text::{action_member, capitalize_first, presenter_class, render_member};
