pub mod resources;
pub mod settings;
pub mod validator;

pub use resources::*;
pub use settings::*;
pub use validator::*;
