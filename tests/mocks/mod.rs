pub mod recording_transport;

#[allow(unused_imports)]
pub use recording_transport::RecordingTransport;
