pub mod product;
pub mod quote;

pub use product::LoanProduct;
pub use quote::{build_quote, LoanQuote, QuoteInput, QuoteRequest};
