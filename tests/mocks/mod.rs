pub mod mock_channel_adapter;

#[allow(unused_imports)]
pub use mock_channel_adapter::{MockBehavior, MockChannelAdapter};
