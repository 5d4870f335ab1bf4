pub mod clustering;
pub mod culling;
pub mod distance;
pub mod priority;
