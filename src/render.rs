pub mod backend;
pub mod placement;
pub mod raster;
pub mod resvg_host;
pub mod surface;
