//! Business logic and repository trait definitions for Klaxon.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the pure relevance-matching and
//! status-classification logic. It depends only on `klaxon-types` -- never on
//! `klaxon-infra` or any database/IO crate.

pub mod provider;
pub mod relevance;
pub mod repository;
pub mod service;
pub mod status;
