//! Tectonic plate partitioning of the region graph.

mod plate;

pub use plate::{PlateId, TectonicPlate};
