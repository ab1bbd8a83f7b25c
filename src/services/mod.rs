pub mod catalog;
pub mod engine;
pub mod pairing;
pub mod providers;
