//! Shared fakes and builders for bridge tests.

mod fixtures;
mod service;
mod sink;

pub use fixtures::UpdateRequestBuilder;
pub use service::{FakeDfuService, NoopControl};
pub use sink::{RecordedEvent, RecordingSink};
