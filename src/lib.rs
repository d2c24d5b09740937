pub mod application;
pub mod archive;
pub mod backend;
pub mod cleanup;
pub mod commands;
pub mod download;
pub mod http;
pub mod package;
pub mod runtime;
pub mod translate;
