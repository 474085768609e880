pub mod order;
pub mod product;
pub mod recommendation;

pub use order::{LineItem, Order};
pub use product::{Pricing, Product, ProductImage, Rating};
pub use recommendation::{Candidate, Recommendation};
