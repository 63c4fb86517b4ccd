mod errors;
mod validator;

pub use errors::{RowRejection, ShardField};
pub use validator::RowValidator;
