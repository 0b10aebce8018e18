//! golift-lib: core logic for the golift build pipeline.
//!
//! This crate provides the pieces the `golift` binary is assembled from:
//! - `Project`: the declarative service description with its ordered functions
//! - `Config`: resolved build options, every field backed by a default
//! - `EntryPointSpec`: classification of handlers into generated entrypoints
//! - build/test orchestration over an external process runner

pub mod build;
pub mod codegen;
pub mod config;
pub mod consts;
pub mod entrypoint;
pub mod error;
pub mod exec;
pub mod package;
pub mod project;
pub mod select;
pub mod template;
pub mod testrun;
pub mod workspace;
