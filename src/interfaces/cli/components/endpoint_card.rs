use std::io::{self, Write};

use super::badge;
use super::chart::TrafficChart;
use crate::application::use_cases::traffic::format_number;
use crate::domain::endpoint::Endpoint;
use crate::interfaces::cli::router::Route;

pub fn render_endpoint_card(out: &mut dyn Write, endpoint: &Endpoint) -> io::Result<()> {
    writeln!(out, "{} {}", endpoint.name, badge(endpoint.is_active))?;
    writeln!(
        out,
        "  {}",
        Route::Endpoint {
            endpoint_id: endpoint.id.clone()
        }
    )?;
    TrafficChart::new(&endpoint.traffic).compact().render(out)?;
    writeln!(
        out,
        "  Failed {}   Success {}",
        format_number(endpoint.total_failure),
        format_number(endpoint.total_success)
    )
}
