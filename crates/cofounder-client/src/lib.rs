pub mod api_client;
pub mod controller;
pub mod sample_ideas;
pub mod session;
