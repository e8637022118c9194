use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Scrape;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Channels, Feeds, Translate, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan",
        Phase::Channels => "channels",
        Phase::Feeds => "feeds",
        Phase::Translate => "translate",
        Phase::Render => "render",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"),
        Phase::Channels => info_span!("channels"),
        Phase::Feeds => info_span!("feeds"),
        Phase::Translate => info_span!("translate"),
        Phase::Render => info_span!("render"),
    }}
}

impl OpMarker for Scrape {
    const NAME: &'static str = "scrape";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("scrape") }
}
