// Common test utilities for integration tests

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::TestKb;
#[allow(unused_imports)]
pub use helpers::{assert_valid_stats, build_services, create_test_services, permissive_config};
