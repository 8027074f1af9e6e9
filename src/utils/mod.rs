pub mod ipfs;
pub mod pipeline;
pub mod units;
