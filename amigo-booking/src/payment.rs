use crate::card::CardDetails;
use crate::flow::BookingError;
use crate::models::{BookingKind, PriceQuote};
use crate::reference::generate_booking_reference;
use async_trait::async_trait;

/// What a completed payment hands back to the flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: f64,
}

/// Seam for the payment step. The shipped implementation is synthetic; a real
/// processor integration would slot in here without touching the flow.
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    async fn process(
        &self,
        kind: BookingKind,
        quote: &PriceQuote,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, BookingError>;
}

/// No processor behind it: charges nothing, synthesizes the booking
/// reference locally. This is the production default, matching the app it
/// replaces.
#[derive(Debug, Default)]
pub struct SyntheticPaymentAdapter;

#[async_trait]
impl PaymentAdapter for SyntheticPaymentAdapter {
    async fn process(
        &self,
        kind: BookingKind,
        quote: &PriceQuote,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, BookingError> {
        let reference = generate_booking_reference(kind);
        tracing::info!(
            "Synthetic payment of {} for {} accepted, reference {} (card {:?})",
            quote.total,
            card.cardholder_name,
            reference,
            card.number,
        );
        Ok(PaymentReceipt {
            reference,
            amount: quote.total,
        })
    }
}
