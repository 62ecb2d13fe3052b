const BRANDS_RETRIEVED_METRIC_NAME: &str = "brands_retrieved";

#[inline]
pub fn increment_brands_retrieved() {
    metrics::counter!(BRANDS_RETRIEVED_METRIC_NAME).increment(1);
}
