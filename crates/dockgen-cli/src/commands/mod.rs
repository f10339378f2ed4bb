mod detect;
mod doctor;
mod generate;
mod render;
mod validate;

pub use detect::detect;
pub use doctor::doctor;
pub use generate::{GenerateArgs, generate};
pub use render::render;
pub use validate::validate;
