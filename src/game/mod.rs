pub mod console;
pub mod params;
pub mod session;
