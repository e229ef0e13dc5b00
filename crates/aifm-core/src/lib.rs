pub mod actions;
pub mod config;
pub mod errors;
pub mod intent;
pub mod mutation;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::*;
pub use reducer::*;
pub use state::*;

pub use config::Config;
pub use errors::*;
pub use intent::Resolution;
pub use persistence::*;
pub use store::ViewStateStore;
