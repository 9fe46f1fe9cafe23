pub mod mapper;
pub mod metric;
pub mod snapshot;
