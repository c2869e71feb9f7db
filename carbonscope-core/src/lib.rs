pub mod analysis;
pub mod compare;
pub mod error;
pub mod export;
pub mod loader;
pub mod simulation;
pub mod wizard;
