/// A request to convert an amount between two currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: i64,
    pub from_currency: String,
    pub to_currency: String,
}
