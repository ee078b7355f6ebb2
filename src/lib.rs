//! Reactive field dependencies and validation for business forms
//!
//! A [`engine::FormController`] owns one form snapshot plus its dependency
//! and validation tables, routes input events through them, and gates
//! submission on the fields that are actually visible.

pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod ledger;
pub mod rules;
