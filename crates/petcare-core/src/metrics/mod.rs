//! Aggregation engine for the dashboard and statistics views.
//!
//! Every function is a read-only view over `(now, collections)`. Instants are
//! compared as instants. The two calendar-day operations (due-today and the
//! activity histogram) read the calendar in the timezone carried by `now`;
//! hosts pass `Local::now()`, tests pass a fixed offset.

mod counts;
mod query;
mod ranking;
mod series;
mod summary;

pub use counts::*;
pub use query::*;
pub use ranking::*;
pub use series::*;
pub use summary::*;

use crate::models::Record;

/// Records belonging to `pet_id`, in their original order.
///
/// An unknown pet yields an empty list.
pub fn for_pet<'a, T: Record + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    pet_id: &str,
) -> Vec<&'a T> {
    items
        .into_iter()
        .filter(|item| item.pet_id() == pet_id)
        .collect()
}
