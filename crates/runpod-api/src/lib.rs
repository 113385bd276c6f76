pub mod schemas;

pub use schemas::*;
