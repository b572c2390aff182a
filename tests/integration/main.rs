//! Integration tests for docmirror
//!
//! These tests use wiremock to stand in for the content API and exercise the
//! full mirror cycle end-to-end against temporary output directories.

mod batch_tests;
