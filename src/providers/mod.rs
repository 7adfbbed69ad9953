//! Quote provider implementations

pub mod apiverve;

pub use apiverve::QuoteClient;
