//!  Storage is organized around named slots.
//!  The basic idea is:
//!   - There is a directory with one JSON file per slot, mirroring browser local storage.
//!   - Every tracker collection owns exactly one slot and rewrites it whole on each change.
//!   - [binding::Binding] keeps an in-memory copy of a slot in sync with the storage.
//!   - [keyed] provides the find-or-replace logic shared by every collection.

pub mod binding;
pub mod keyed;
pub mod slot;
