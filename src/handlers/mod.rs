mod count;
mod health;
mod metrics;


pub use count::count_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
