pub mod export;
pub mod pages;
pub mod stats;

#[cfg(test)]
mod tests;
