pub mod views;
pub mod wings;
