mod earth;
mod figure;
mod frames;

pub use earth::EarthMesh;
pub use figure::{build_figure, Figure};
pub use frames::{build_frames, trail_length, Frame};
