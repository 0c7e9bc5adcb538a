pub mod charts;

pub use charts::{ChartError, ChartService, PlatformPopulateStatus, PopulateReport};
