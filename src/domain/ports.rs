use crate::domain::model::DocumentMetadata;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn ruleset_path(&self) -> Option<&str>;
    fn intermediate_path(&self) -> Option<&str>;
    fn tech_catalog_path(&self) -> Option<&str>;
    fn units_file(&self) -> &str;
    fn raw_file(&self) -> &str;
    fn techs_file(&self) -> &str;
    fn write_intermediate(&self) -> bool;
    fn metadata(&self) -> &DocumentMetadata;
}

/// One extract -> transform -> load flow, run to completion by `EtlEngine`.
pub trait Pipeline {
    type Extracted;
    type Transformed;

    fn name(&self) -> &'static str;
    fn extract(&self) -> Result<Self::Extracted>;
    fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    /// Writes the result and returns where it went.
    fn load(&self, result: Self::Transformed) -> Result<String>;
}
