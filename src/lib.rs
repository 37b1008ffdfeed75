// ABOUTME: Library crate for muxdev exposing the provisioning modules for testing

pub mod config;
pub mod paths;
pub mod tmux;
