pub mod fallback;
pub mod regions;
pub mod samples;

pub use regions::{find_region, Region, REGIONS};
