//! Property tests that drive an `OrderedTree` with random operations and compare it against
//! `std`'s ordered collections.

mod logging;
mod ordered;

pub(crate) use op::Op;
