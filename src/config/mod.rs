pub mod setting;
pub mod utils;

pub use setting::Setting;
