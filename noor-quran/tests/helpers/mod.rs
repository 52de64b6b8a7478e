//! Shared test helpers for noor-quran integration tests

#![allow(dead_code)]

pub mod fake_service;
pub mod mock_source;

pub use fake_service::FakeService;
pub use mock_source::{chapter, MockSource, RecordingOpener, RecordingSink};
