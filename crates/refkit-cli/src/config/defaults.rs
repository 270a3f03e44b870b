use refkit::core::io::frames::MalformedCountPolicy;
use refkit::engine::config::DEFAULT_BATCH_SIZE;

pub struct DefaultsConfig {
    pub batch_size: usize,
    pub malformed_count: MalformedCountPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            malformed_count: MalformedCountPolicy::Skip,
        }
    }
}
