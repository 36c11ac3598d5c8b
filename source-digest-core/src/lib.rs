#![doc = "source-digest-core: the collection pipeline behind source-digest."]

//! Walks search roots, filters every matching file through a per-language
//! line strategy and appends the result to a single output artifact.
//! Argument parsing, config files and the system viewer live in the
//! `source-digest` crate; this crate only sees a built [`config::CollectConfig`].
//!
//! # Usage
//! Build a config with [`config::CollectConfig::builder`] and hand it to
//! [`collect::Collector`].

pub mod collect;
pub mod config;
pub mod contract;
pub mod discovery;
pub mod error;
pub mod observer;
pub mod output;
pub mod path_display;
pub mod strategy;
