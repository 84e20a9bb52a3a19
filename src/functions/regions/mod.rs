//! Region nodes: queries producing sets of sites.
//!
//! Out-of-range site indices reaching a region query are defects in the
//! rules tree. They trip a debug assertion, are logged, and produce an
//! empty region in release builds.

mod algebra;
mod cell;
mod empty;
mod sites;
mod support;

use tracing::error;

use crate::board::SiteType;
use crate::game::Region;

pub use algebra::{RegionDifference, RegionFold, RegionIntersection, RegionUnion};
pub use cell::{SitesCell, SitesEdge};
pub use empty::SitesEmpty;
pub use sites::{Sites, SitesBoard, SitesOccupied, SitesRow, SitesState};
pub use support::SitesSupport;

/// Report an out-of-range index and give the invalid-region sentinel.
pub(crate) fn out_of_range(ludeme: &'static str, site_type: SiteType, index: i32) -> Region {
    error!(ludeme, ?site_type, index, "index out of range in region query");
    debug_assert!(false, "{ludeme}: {site_type:?} index {index} out of range");
    Region::new()
}
