pub mod registry;
pub mod storage;
