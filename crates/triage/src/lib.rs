pub mod errors;
pub mod extract;
pub mod models;
pub mod providers;
pub mod router;
pub mod specialists;
