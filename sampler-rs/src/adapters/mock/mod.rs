//! Simulated push sources and an in-memory transport.
//!
//! Sources can be driven by hand with `push`, or built with a generator that pushes
//! noisy readings at the interval requested by the subscriber.

mod gaussian;
mod generator;
mod location;
mod sensor;
mod transport;

pub use gaussian::GaussianNoise;
pub use location::SimulatedLocation;
pub use sensor::SimulatedSensor;
pub use transport::{MockResponse, TransportMock};
