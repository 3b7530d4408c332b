//! Status, dashboard and reset commands

use super::today;
use crate::app::MoneyUp;
use crate::display::{format_dashboard, format_status};
use crate::error::{MoneyUpError, MoneyUpResult};
use crate::services::Screen;

pub fn handle_status_command(app: &MoneyUp) -> MoneyUpResult<()> {
    print!("{}", format_status(app.screen(), &app.onboarding()));
    Ok(())
}

/// Render the dashboard, or explain which screen is still pending
pub fn handle_dashboard_command(app: &MoneyUp) -> MoneyUpResult<()> {
    let settings = app.settings();

    match app.dashboard_summary(today())? {
        Ok(summary) => {
            print!(
                "{}",
                format_dashboard(&summary, &settings.currency_symbol, &settings.date_format)
            );
            Ok(())
        }
        Err(Screen::Onboarding) => Err(MoneyUpError::Onboarding(
            "Dashboard is locked until onboarding is completed. Run `moneyup onboard`".into(),
        )),
        Err(pending) => Err(MoneyUpError::Payment(format!(
            "Dashboard is locked; pending screen: {}. Run `moneyup pay --name <NAME> --email <EMAIL>`",
            pending
        ))),
    }
}

/// Remove all stored data
pub fn handle_reset_command(app: &MoneyUp, force: bool) -> MoneyUpResult<()> {
    if !force {
        println!("This removes all transactions, your profile and premium status.");
        println!("Use --force to confirm reset");
        return Ok(());
    }

    let removed = app.reset()?;
    println!("Reset complete ({} stored items removed).", removed);
    Ok(())
}
