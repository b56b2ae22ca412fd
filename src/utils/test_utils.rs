//! Test utilities for precompile testing.
