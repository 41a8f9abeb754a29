//! Application state module

mod forms;
mod notice;
mod quote;
mod step;
mod wizard;

pub use forms::*;
pub use notice::*;
pub use quote::*;
pub use step::*;
pub use wizard::*;
