//! Data types shared by the loaders, the header builder and the code generator.

mod cell;
mod column;
mod merge;
mod workbook;

pub use cell::*;
pub use column::*;
pub use merge::*;
pub use workbook::*;
