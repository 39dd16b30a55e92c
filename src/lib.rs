//! English to Kannada translation through an ordered chain of web
//! providers, with optional speech output and speech input.
//!
//! The [`application::translate::TranslatorChain`] is the core: it tries each
//! configured provider in turn and returns the first acceptable result. The
//! HTTP API and the `kntr` binary are thin callers around it.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
