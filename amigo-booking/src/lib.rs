pub mod card;
pub mod confirm;
pub mod flow;
pub mod models;
pub mod payment;
pub mod pricing;
pub mod reference;

pub use card::CardDetails;
pub use confirm::AutoDismiss;
pub use flow::{BookingError, BookingFlow, BookingStep};
pub use models::{BookingKind, BookingSelection, PriceQuote};
pub use payment::{PaymentAdapter, PaymentReceipt, SyntheticPaymentAdapter};
