use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Deliver;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Paginate, Login, Search, Page }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan",
        Phase::Paginate => "paginate",
        Phase::Login => "login",
        Phase::Search => "search",
        Phase::Page => "page",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"),
        Phase::Paginate => info_span!("paginate"),
        Phase::Login => info_span!("login"),
        Phase::Search => info_span!("search"),
        Phase::Page => info_span!("page"),
    }}
}

impl OpMarker for Deliver {
    const NAME: &'static str = "send";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("send") }
}
