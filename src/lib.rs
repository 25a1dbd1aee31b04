pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod leaderboard;
pub mod loader;
pub mod protocol;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
