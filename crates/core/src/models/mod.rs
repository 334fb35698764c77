pub mod holding;
pub mod market;
pub mod portfolio;
pub mod settings;
pub mod valuation;
