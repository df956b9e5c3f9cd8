mod generate;

pub use generate::{generate, render};
