pub mod policy;
pub mod ranker;

// Re-export key types for convenience
pub use policy::RankingPolicy;
pub use ranker::Ranker;
