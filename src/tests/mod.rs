// Test modules

pub mod common;
mod item_api_test;
