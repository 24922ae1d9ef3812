//! Rentra demo console.
//!
//! Thin client that boots a ledger from configuration and drives one
//! scripted rental session through it, logging each step. The engine is
//! the authority; this binary only calls its operations and renders the
//! results.

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rentra_core::ledger::{ItemSpec, ItemStatus, RentalLedger};
use rentra_shared::{Amount, EngineConfig, RenterId};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentra=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = EngineConfig::load().unwrap_or_else(|error| {
        info!(%error, "no configuration found, using defaults");
        EngineConfig {
            fee: rentra_shared::FeeConfig::default(),
        }
    });
    info!(policy = ?config.fee.policy, "fee policy configured");

    let operator = RenterId::new();
    let mut ledger = RentalLedger::from_config(operator, &config);
    info!(%operator, "ledger initialized");

    // Operator lists an item.
    let item_id = ledger.add_item(
        operator,
        ItemSpec {
            name: "Yamaha R25".to_string(),
            image_url: "https://example.com/r25.jpg".to_string(),
            per_use_fee: Amount::new(10),
            sale_price: Amount::new(50_000),
        },
    )?;
    info!(%item_id, "item listed");

    // A renter registers, funds their balance, and rents the item.
    let renter = RenterId::new();
    ledger.register(renter, "David", "Jhonson")?;
    ledger.deposit(renter, Amount::new(500))?;
    let funded = ledger.renter(renter)?.balance;
    info!(%renter, balance = %funded, "renter funded");

    let checked_out_at = Utc::now();
    ledger.check_out(renter, item_id, checked_out_at)?;
    info!(%item_id, "checked out");

    // Pretend ten minutes passed on the platform clock.
    let returned_at = checked_out_at + chrono::TimeDelta::minutes(10);
    let fee = ledger.check_in(renter, returned_at)?;
    info!(%fee, "checked in, fee accrued");

    let paid = ledger.make_payment(renter)?;
    let collected = ledger.total_payments(operator)?;
    info!(%paid, revenue = %collected, "debt settled");

    let remaining = ledger.renter(renter)?.balance;
    let refund = ledger.withdraw_balance(renter, remaining)?;
    info!(amount = %refund.amount, "renter withdrew remaining balance");

    let revenue = ledger.total_payments(operator)?;
    let payout = ledger.withdraw_revenue(operator, revenue)?;
    info!(amount = %payout.amount, "operator withdrew revenue");

    let available = ledger.items_by_status(ItemStatus::Available).len();
    info!(
        renters = ledger.renter_count(),
        items = ledger.item_count(),
        available,
        "final ledger state"
    );

    Ok(())
}
