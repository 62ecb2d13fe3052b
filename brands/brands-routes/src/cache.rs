use std::time::Duration;

/// The `Cache-Control` value sent with every brand. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControl(String);

impl CacheControl {
    pub fn max_age(duration: Duration) -> Self {
        Self(format!(
            "max-age={}, public",
            duration.as_secs_f64().round() as u64
        ))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl Default for CacheControl {
    fn default() -> Self {
        Self::max_age(Duration::from_secs(60 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_age_is_in_whole_seconds() {
        assert_eq!(
            "max-age=9900, public",
            CacheControl::max_age(Duration::from_secs(2 * 60 * 60 + 45 * 60)).header_value()
        );
        assert_eq!(
            "max-age=2, public",
            CacheControl::max_age(Duration::from_millis(1500)).header_value()
        );
        assert_eq!("max-age=3600, public", CacheControl::default().header_value());
    }
}
