pub(crate) mod reader;
pub(crate) mod sample;
pub(crate) mod store;
