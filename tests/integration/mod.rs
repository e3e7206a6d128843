//! Integration test suite for the stageline binary

mod helpers;

mod test_inspect;
mod test_rollback;
mod test_verify;
