use std::io::Write;

use tracing::{info, warn};

use crate::AppContext;

/// Run a single reminder sweep at the context clock's current time.
pub async fn sweep_once<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<usize> {
    let reminded = ctx.reminders.sweep(ctx.clock.now()).await?;
    writeln!(out, "Reminders sent: {reminded}")?;
    Ok(reminded)
}

/// Run the cron-driven reminder scheduler until `shutdown` resolves.
pub async fn run_reminder_scheduler<F>(ctx: &AppContext, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()>,
{
    if !ctx.config.reminders.enabled {
        warn!("Reminders are disabled in the configuration");
        return Ok(());
    }

    let mut scheduler = ctx.reminder_scheduler();
    scheduler.start().await?;
    info!(cron = %ctx.config.reminders.cron_expression, "Waiting for shutdown signal");

    shutdown.await;

    scheduler.stop().await?;
    Ok(())
}
