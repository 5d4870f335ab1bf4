pub mod clustering;

pub use clustering::ClusterWorker;
