// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! the laws relating the higher-order and array-set operations.

mod array_laws;
mod collection_laws;
