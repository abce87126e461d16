#![allow(dead_code, unused_imports)]

pub(crate) mod serving_config;
pub(crate) mod test_context;

pub(crate) use serving_config::{REFERENCE_YAML, write_config};
pub(crate) use test_context::TestContext;
