//! Integration tests for the Huffman container pipeline.
//!
//! These tests drive the public API end to end, from raw buffers to
//! containers and back, and pin the container layout byte for byte.

mod format_compatibility;
mod full_pipeline;
