mod controller;
mod input;

pub use controller::PredictiveInputController;
pub use input::PaddleInput;
