mod chain_id;
mod errors;

pub use chain_id::ChainId;
pub use errors::ChainIdError;

pub type Address = String;
pub type ShardId = u32;
