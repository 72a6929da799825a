pub mod string;

pub use string::unescape;
