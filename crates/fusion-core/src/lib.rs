//! Constructive solid geometry for the cylindrical blanket / vessel stack.
//!
//! Layer thicknesses → surfaces → regions → validated partition → cells,
//! plus source placement and tally bucketing on top of the partition.

pub mod catalog;
pub mod cell;
pub mod region;
pub mod source;
pub mod surface;
pub mod tally;
pub mod validate;

pub use catalog::{RegionCatalog, RegionName};
pub use cell::{Cell, Fill, MaterialHandle, MaterialTable, Partition};
pub use region::{HalfSpace, Region, Side};
pub use surface::{Surface, SurfaceId, SurfaceStack};
