pub mod reducer;

pub use reducer::{BatchReport, ColorChange, ColorReducer};
