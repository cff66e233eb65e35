//! `atelier status` -- query a server's credential availability.

use console::style;

use atelier_infra::client::fetch_status;

pub async fn run(server: &str, json: bool) -> anyhow::Result<()> {
    let status = fetch_status(server).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let mark = if status.hosted_available {
        format!("{}", style("✓").green())
    } else {
        format!("{}", style("✗").red())
    };
    println!();
    println!("  {mark} {}", status.message);
    println!();
    Ok(())
}
