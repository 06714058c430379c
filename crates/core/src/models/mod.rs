pub mod chart;
pub mod dashboard;
pub mod history;
pub mod metrics;
pub mod quote;
pub mod settings;
