pub mod accessibility;
pub mod alerts;
pub mod clipboard;
pub mod collab;
pub mod config;
pub mod contract;
pub mod controller;
pub mod dom;
pub mod enhancements;
pub mod keyboard;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod submission;
pub mod suggestions;
pub mod timer;
pub mod transport;
