pub mod types;

pub mod classify;
pub mod encode;
pub mod resolve;

pub use classify::classify_lines;
pub use encode::encode;
pub use resolve::resolve;
