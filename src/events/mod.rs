pub mod keyboard;
pub mod player;

pub use keyboard::wire_keyboard;
pub use player::{wire_file_input, wire_transport_buttons};
