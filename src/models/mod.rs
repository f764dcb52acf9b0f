mod customer;
mod product;

pub use customer::{CustomerList, CustomerRecord};
pub use product::Product;
