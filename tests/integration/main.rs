//! Integration test suite

mod e2e_test;
mod feed_test;
mod support;
mod tracker_test;
