pub mod catch;
pub mod either;

pub use catch::{Cancelled, Caught, Fatal};
pub use either::{Either, Left, Right, left, right};
