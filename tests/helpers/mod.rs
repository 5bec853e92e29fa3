#![allow(dead_code, unused_imports)]
pub mod mailers;
pub mod test_store;

pub use mailers::*;
pub use test_store::*;
