pub mod components;
pub mod execution;
pub mod memory;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
