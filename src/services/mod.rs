pub mod delivery;
pub mod mailer;
pub mod renderer;

pub use delivery::*;
pub use mailer::*;
pub use renderer::*;
