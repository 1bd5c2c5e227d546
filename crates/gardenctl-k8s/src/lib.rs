pub mod client;
pub mod kubectl;
pub mod resolver;
pub mod scan;
pub mod shoot;
