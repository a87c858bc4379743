use std::io::Write;

use tracing::debug;

use crate::domain::error::Result;
use crate::interfaces::cli::components::endpoint_card::render_endpoint_card;
use crate::interfaces::cli::components::page_header;
use crate::interfaces::cli::state::ConsoleState;

pub async fn render(state: &ConsoleState, out: &mut dyn Write) -> Result<()> {
    let endpoints = state.endpoints.list_endpoints().await?;
    debug!(count = endpoints.len(), "Dashboard loaded");

    page_header(out, &[], "Endpoints")?;
    if endpoints.is_empty() {
        writeln!(out)?;
        writeln!(out, "No endpoints yet. Create one with: endpoint new --key KEY --name NAME")?;
        return Ok(());
    }
    for endpoint in &endpoints {
        writeln!(out)?;
        render_endpoint_card(out, endpoint)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fake_api::sample_endpoint;
    use crate::interfaces::cli::pages::testing::{logged_in, text};

    #[tokio::test]
    async fn test_one_card_per_endpoint() {
        let (api, state) = logged_in();
        let mut orders = sample_endpoint("ep-1", "orders", "Orders");
        orders
            .traffic
            .insert("SUCCESS".to_string(), vec![(1_700_000_000, 5), (1_700_000_060, 10)]);
        orders.total_success = 15;
        api.add_endpoint(orders);
        api.add_endpoint(sample_endpoint("ep-2", "invoices", "Invoices"));

        let mut out = Vec::new();
        render(&state, &mut out).await.unwrap();
        let text = text(out);

        assert!(text.starts_with("My Account / Endpoints\n"));
        assert!(text.contains("Orders [Active]\n  /endpoints/ep-1\n"));
        assert!(text.contains("Invoices [Active]\n  /endpoints/ep-2\n"));
        assert!(text.contains("Success 15"));
        assert!(text.contains("(no traffic)"));
    }

    #[tokio::test]
    async fn test_empty_dashboard_hint() {
        let (_api, state) = logged_in();
        let mut out = Vec::new();
        render(&state, &mut out).await.unwrap();
        assert!(text(out).contains("No endpoints yet"));
    }
}
