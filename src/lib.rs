pub mod api;
pub mod burn;
pub mod config;
pub mod pipeline;
pub mod price;
pub mod sources;
pub mod tokens;
