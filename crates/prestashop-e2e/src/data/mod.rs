// Test data factories
//
// Records are generated once per scenario, used to drive the forms of the
// back office, and deleted again by the scenario's cleanup steps.

pub mod product;

pub use product::{ProductData, ProductOverrides, ProductType};
