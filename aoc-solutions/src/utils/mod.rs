pub mod dp_cache;
pub mod grid;
pub mod parse;
pub mod region;
pub mod search;
