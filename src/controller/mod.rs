pub mod phase;
pub mod view_controller;
pub mod view_state;

pub use view_controller::ViewController;
pub use view_state::ViewState;
