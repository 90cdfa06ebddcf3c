mod meta;
pub use self::meta::{Metadata, TestResponse};

mod price;
pub use self::price::{Frequency, PriceRecord};

mod quote;
pub use self::quote::Quote;
