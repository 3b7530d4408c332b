//! Payment CLI command

use crate::app::MoneyUp;
use crate::error::MoneyUpResult;
use crate::services::{PaymentOutcome, PaymentRequest, PaymentState, Screen};

/// Run the one-time premium payment
pub fn handle_pay_command(app: &MoneyUp, name: String, email: String) -> MoneyUpResult<()> {
    let settings = app.settings();
    let request = PaymentRequest::premium(settings, name, email);

    let gate = app.payment_gate();
    if gate.state() == PaymentState::Unpaid && app.screen() == Screen::Payment {
        request.validate()?;
        println!(
            "Processing payment of {} for {}...",
            request.amount.format_with_symbol(&settings.currency_symbol),
            request.description
        );
    }

    match gate.pay(&request)? {
        PaymentOutcome::Paid(receipt) => {
            println!("Payment successful!");
            println!("  Payment ID: {}", receipt.payment_id);
            println!(
                "  Amount:     {} {}",
                receipt.amount.format_with_symbol(&settings.currency_symbol),
                receipt.currency
            );
            println!("  Receipt to: {}", receipt.email);
            println!();
            println!("Premium unlocked. Run `moneyup dashboard` to view your budget.");
        }
        PaymentOutcome::AlreadyPaid(receipt) => {
            println!("Premium is already unlocked.");
            if let Some(receipt) = receipt {
                println!(
                    "  Paid on {} ({})",
                    receipt.paid_at.format("%Y-%m-%d"),
                    receipt.payment_id
                );
            }
        }
    }

    Ok(())
}
