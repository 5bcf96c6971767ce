pub mod reading;
pub mod threshold;
pub mod user;

pub use reading::{NewReading, SensorReading};
pub use threshold::{NewThreshold, Threshold};
pub use user::{NewUser, User, UserCredentials};
