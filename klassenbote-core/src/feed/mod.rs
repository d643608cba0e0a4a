//! Raw feed readers.
//!
//! Both upstream sources arrive as already-materialized files: the
//! semicolon-delimited calendar export and the scraped substitution JSON.
//! These modules only read rows; normalization into [`crate::Event`] happens
//! in `normalize`.

pub mod calendar;
pub mod substitution;

pub use calendar::CalendarRow;
pub use substitution::SubstitutionRow;
