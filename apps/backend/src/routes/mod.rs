pub mod content;
pub mod dictionary;
pub mod study;
