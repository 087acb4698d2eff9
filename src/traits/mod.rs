mod indicator;
pub use indicator::Indicator;
