#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

// Modules that make up the Table View library.
mod args;
mod columns;
mod container;
mod error;
mod layout;
mod pagination;
mod panel;
mod row_model;
mod search;
mod sort;
mod state;
mod traits;
mod widget;

// Publicly expose the contents of these modules.
pub use self::{
    args::Arguments, columns::*, container::*, error::*, layout::*, pagination::*, panel::*,
    row_model::*, search::*, sort::*, state::*, traits::*, widget::*,
};
