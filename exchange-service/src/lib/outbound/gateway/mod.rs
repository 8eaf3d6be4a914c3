pub mod currency;

pub use currency::ApiLayerCurrencyGateway;
