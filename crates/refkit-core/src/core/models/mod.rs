pub mod definition;
pub mod frame;
pub mod record;
