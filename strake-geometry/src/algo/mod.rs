/// curve algorithms
pub mod curve;
/// surface algorithms
pub mod surface;
