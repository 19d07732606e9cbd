pub(crate) mod config;
pub(crate) mod properties;
pub(crate) mod region;
pub(crate) mod tracker;
