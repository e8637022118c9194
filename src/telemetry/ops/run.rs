use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Run;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Scrape, Render, Deliver, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan",
        Phase::Scrape => "scrape",
        Phase::Render => "render",
        Phase::Deliver => "deliver",
        Phase::Write => "write",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"),
        Phase::Scrape => info_span!("scrape"),
        Phase::Render => info_span!("render"),
        Phase::Deliver => info_span!("deliver"),
        Phase::Write => info_span!("write"),
    }}
}

impl OpMarker for Run {
    const NAME: &'static str = "run";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("run") }
}
