pub mod menu;
pub mod state;

pub use menu::Menu;
pub use state::AppState;
