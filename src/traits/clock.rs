/// Wall-clock source in milliseconds since the Unix epoch
pub trait TimeSource {
    fn now_millis(&self) -> f64;
}
