pub mod clipboard;
pub mod connection;
pub mod status;
pub mod sync;
pub mod web;
