use serde::{Deserialize, Serialize};

/// An item together with its count.
///
/// Produced by ranking and export operations such as
/// [`Counter::most_common`](crate::Counter::most_common); never stored
/// inside the counter itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount<T> {
    pub item: T,
    pub count: i64,
}
