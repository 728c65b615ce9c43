//! A generic counter: a mapping from items to signed counts, in the spirit
//! of Python's `collections.Counter`.

pub mod counter;
pub mod item_count;

pub use counter::Counter;
pub use item_count::ItemCount;
