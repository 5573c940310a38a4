pub mod background;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod input;
pub mod services;
