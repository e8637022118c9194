use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Catalog;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Load, List }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Load => "load",
        Phase::List => "list",
    }}
    fn span(&self) -> Span { match self {
        Phase::Load => info_span!("load"),
        Phase::List => info_span!("list"),
    }}
}

impl OpMarker for Catalog {
    const NAME: &'static str = "catalog";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("catalog") }
}
