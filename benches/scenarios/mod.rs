//! Benchmarks for whole render passes.

mod render;

pub use render::bench_render;
