pub mod material;
pub mod prediction;
pub mod product;
