pub mod duration;
pub mod normalize;
