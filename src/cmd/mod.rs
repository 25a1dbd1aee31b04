pub mod export;
pub mod rank;
pub mod score;
pub mod simulate;
pub mod stats;
