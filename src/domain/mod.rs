// Domain layer: record and document models plus the ports pipelines talk through.

pub mod model;
pub mod ports;
