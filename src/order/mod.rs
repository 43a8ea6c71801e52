mod read_op;
pub mod record;
pub mod storage;
mod write_op;

pub use record::{Order, OrderBuilder};
pub use storage::OrderStorage;
