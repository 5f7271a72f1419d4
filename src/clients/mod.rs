pub mod discount;

#[cfg(test)]
pub mod mock;
