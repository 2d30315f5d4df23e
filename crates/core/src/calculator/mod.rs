//! Contribution calculator: the pure transform, its rounded display and the
//! per-surface session that drives recalculation.

mod calculator_model;
mod calculator_service;
mod contribution_calculator;
mod display;
mod session;

pub use calculator_model::*;
pub use calculator_service::{CalculatorService, CalculatorServiceTrait};
pub use contribution_calculator::{calculate, calculate_category};
pub use display::DisplayedFigures;
pub use session::{CalculatorSession, InputChange, RevenueField};
