//! Element tree and HTML rendering for webform-toolkit.
//!
//! This crate is the "element factory" collaborator of the form core: it
//! knows how to hold a tag with attributes, classes, inline style, text,
//! and children, and how to print all of that as HTML. It knows nothing
//! about fields, rules, or validity.

pub mod element;

pub use element::{Element, html_escape};
