//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead.
//!
//! Structure:
//! - helpers: Session builders and assertions
//! - integration: Multi-step drawing workflows through `DrawingSession`
//! - unit: Single-component tests, including property tests
