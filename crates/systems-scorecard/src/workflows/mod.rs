pub mod assessment;
pub mod leads;
