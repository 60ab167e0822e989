pub mod catalog;
pub mod cost;
pub mod etl;
pub mod lookup;
pub mod normalizer;
pub mod record_parser;
pub mod section;
pub mod serializer;

pub use crate::domain::model::{RawRecord, RawUnits};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
