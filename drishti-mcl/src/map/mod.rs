//! Occupancy raster used to reject particles inside walls and obstacles.

mod occupancy;

pub use occupancy::OccupancyRaster;
