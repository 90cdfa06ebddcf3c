mod common;
pub use self::common::{Query, QueryCommon};

mod price;
pub use self::price::PriceQuery;

mod quote;
pub use self::quote::QuoteQuery;
