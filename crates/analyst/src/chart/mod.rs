//! Chart-data projection for categorical and scatter charts.

mod projector;
mod types;

pub use projector::{ChartProjector, ProjectorConfig};
pub use types::{
    Aggregation, CategoricalSeries, ChartPayload, ChartRequest, ChartType, ScatterPoint,
    ScatterSample, SeriesValue,
};
